use api::{ClientRequest, DietItem, Exercise, RequestKind, Uuid, DIET_REASONS, EXERCISE_REASONS};
use dioxus::prelude::*;
use store::MirrorKey;
use ui::use_session;

use crate::views::user_mirror;

/// The three request forms, one visible at a time.
#[component]
pub fn RequestForms(client_id: Uuid, on_error: EventHandler<String>) -> Element {
    let mut open = use_signal(|| RequestKind::Program);
    let mut notice = use_signal(|| Option::<String>::None);

    let on_sent = move |kind: RequestKind| {
        notice.set(Some(format!("Request sent to your trainer ({})", kind.title())));
    };

    rsx! {
        div { class: "card",
            h2 { class: "card-title", "Ask your trainer" }
            div { class: "tabs",
                for kind in RequestKind::ALL {
                    button {
                        key: "{kind.table()}",
                        class: if open() == kind { "tab active" } else { "tab" },
                        onclick: move |_| {
                            notice.set(None);
                            open.set(kind);
                        },
                        {kind.title()}
                    }
                }
            }

            if let Some(message) = notice() {
                p { class: "notice-success", "{message}" }
            }

            match open() {
                RequestKind::Program => rsx! { ProgramRequestForm { on_sent, on_error } },
                RequestKind::ExerciseChange => rsx! { SwapRequestForm { client_id, kind: RequestKind::ExerciseChange, on_sent, on_error } },
                RequestKind::DietChange => rsx! { SwapRequestForm { client_id, kind: RequestKind::DietChange, on_sent, on_error } },
            }
        }
    }
}

async fn send(
    request: ClientRequest,
    on_sent: EventHandler<RequestKind>,
    on_error: EventHandler<String>,
) -> bool {
    if let Err(message) = request.validate() {
        on_error.call(message);
        return false;
    }
    let kind = request.kind();
    match api::submit_request(request).await {
        Ok(()) => {
            on_sent.call(kind);
            true
        }
        Err(e) => {
            on_error.call(e.to_string());
            false
        }
    }
}

#[component]
fn ProgramRequestForm(on_sent: EventHandler<RequestKind>, on_error: EventHandler<String>) -> Element {
    let mut goal = use_signal(String::new);
    let mut notes = use_signal(String::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            let request = ClientRequest::Program {
                goal: goal().trim().to_string(),
                notes: notes().trim().to_string(),
            };
            if send(request, on_sent, on_error).await {
                goal.set(String::new());
                notes.set(String::new());
            }
        }
    };

    rsx! {
        form { class: "inline-form", onsubmit: on_submit,
            label { class: "field",
                span { "Main goal" }
                input {
                    placeholder: "e.g. Hypertrophy, preparing for a race",
                    value: "{goal}",
                    oninput: move |evt: FormEvent| goal.set(evt.value()),
                }
            }
            label { class: "field",
                span { "Notes" }
                textarea {
                    rows: 3,
                    placeholder: "Available days, injuries, equipment...",
                    value: "{notes}",
                    oninput: move |evt: FormEvent| notes.set(evt.value()),
                }
            }
            button { class: "btn btn-primary", r#type: "submit", "Send request" }
        }
    }
}

/// Exercise or meal swap. Suggestions come from the mirrored plan.
#[component]
fn SwapRequestForm(
    client_id: Uuid,
    kind: RequestKind,
    on_sent: EventHandler<RequestKind>,
    on_error: EventHandler<String>,
) -> Element {
    let session = use_session();
    let mut subject = use_signal(String::new);
    let mut reason = use_signal(String::new);

    let (subject_label, reasons, suggestions) = {
        let mirror = user_mirror(&session);
        match kind {
            RequestKind::DietChange => (
                "Meal",
                DIET_REASONS,
                mirror
                    .load::<Vec<DietItem>>(&MirrorKey::diet(client_id))
                    .unwrap_or_default()
                    .into_iter()
                    .map(|d| d.meal_name)
                    .collect::<Vec<_>>(),
            ),
            _ => (
                "Exercise",
                EXERCISE_REASONS,
                mirror
                    .load::<Vec<Exercise>>(&MirrorKey::exercises(client_id))
                    .unwrap_or_default()
                    .into_iter()
                    .map(|e| e.exercise_name)
                    .collect::<Vec<_>>(),
            ),
        }
    };
    let list_id = format!("suggestions-{}", kind.table());

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            let request = match kind {
                RequestKind::DietChange => ClientRequest::DietChange {
                    meal_name: subject().trim().to_string(),
                    reason: reason(),
                },
                _ => ClientRequest::ExerciseChange {
                    exercise_name: subject().trim().to_string(),
                    reason: reason(),
                },
            };
            if send(request, on_sent, on_error).await {
                subject.set(String::new());
                reason.set(String::new());
            }
        }
    };

    rsx! {
        form { class: "inline-form", onsubmit: on_submit,
            label { class: "field",
                span { "{subject_label}" }
                input {
                    list: "{list_id}",
                    value: "{subject}",
                    oninput: move |evt: FormEvent| subject.set(evt.value()),
                }
                datalist { id: "{list_id}",
                    for name in suggestions {
                        option { value: "{name}" }
                    }
                }
            }
            label { class: "field",
                span { "Reason" }
                select {
                    onchange: move |evt: FormEvent| reason.set(evt.value()),
                    option { value: "", selected: reason().is_empty(), "Choose a reason" }
                    for r in reasons {
                        option { value: r, selected: reason() == r, "{r}" }
                    }
                }
            }
            button { class: "btn btn-primary", r#type: "submit", "Send request" }
        }
    }
}
