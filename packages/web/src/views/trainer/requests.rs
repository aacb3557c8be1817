use api::{PendingRequest, RequestKind, Role, Uuid};
use dioxus::prelude::*;
use ui::icons::FaCheck;
use ui::views::{AlertModal, ConfirmModal, PendingIndicator};
use ui::Icon;

use crate::views::Protected;
use crate::Route;

#[component]
pub fn TrainerRequests() -> Element {
    rsx! {
        Protected { required: Role::Trainer,
            RequestsPage {}
        }
    }
}

#[component]
fn RequestsPage() -> Element {
    let mut reload = use_signal(|| 0u32);
    let mut resolving = use_signal(|| Option::<(RequestKind, Uuid)>::None);
    let mut alert = use_signal(|| Option::<String>::None);

    let requests = use_resource(move || async move {
        reload();
        api::list_pending_requests().await
    });

    let on_confirm = move |_| async move {
        let Some((kind, id)) = resolving.take() else {
            return;
        };
        match api::resolve_request(kind, id).await {
            Ok(()) => reload += 1,
            Err(e) => alert.set(Some(e.to_string())),
        }
    };

    rsx! {
        div { class: "dashboard-header",
            div {
                h1 { "Athlete requests" }
                p { class: "muted", "Mark a request as handled once you have updated the plan." }
            }
        }

        match requests() {
            None => rsx! { PendingIndicator {} },
            Some(Err(e)) => rsx! { p { class: "notice-error", "Could not load requests: {e}" } },
            Some(Ok(all)) => rsx! {
                div { class: "request-columns",
                    for kind in RequestKind::ALL {
                        RequestColumn {
                            key: "{kind.table()}",
                            kind,
                            requests: all.iter().filter(|r| r.kind == kind).cloned().collect::<Vec<_>>(),
                            on_resolve: move |id| resolving.set(Some((kind, id))),
                        }
                    }
                }
            },
        }

        if resolving().is_some() {
            ConfirmModal {
                message: "Mark this request as handled? It will be removed from the list.",
                confirm_label: "Mark as handled",
                on_confirm,
                on_cancel: move |_| resolving.set(None),
            }
        }

        if let Some(message) = alert() {
            AlertModal { message, on_close: move |_| alert.set(None) }
        }
    }
}

#[component]
fn RequestColumn(
    kind: RequestKind,
    requests: Vec<PendingRequest>,
    on_resolve: EventHandler<Uuid>,
) -> Element {
    let title = kind.title();
    let count = requests.len();

    rsx! {
        section { class: "card request-column",
            h2 { class: "card-title", "{title} ({count})" }
            if requests.is_empty() {
                p { class: "muted", "Nothing pending." }
            }
            for request in requests {
                div { key: "{request.id}", class: "request-item",
                    Link {
                        class: "item-name",
                        to: Route::ClientManagement { client_id: request.client_id },
                        "{request.client_name}"
                    }
                    div { "{request.subject}" }
                    if let Some(detail) = request.detail.clone().filter(|d| !d.trim().is_empty()) {
                        div { class: "muted", "{detail}" }
                    }
                    div { class: "muted", {request.created_at.format("%d/%m/%Y %H:%M").to_string()} }
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| on_resolve.call(request.id),
                        Icon { icon: FaCheck, width: 12, height: 12 }
                        "Handled"
                    }
                }
            }
        }
    }
}
