//! Trainer home: athlete roster, counters and the pending-request badge.

use api::{ClientSummary, FitnessGoal, Role, TrainerStats};
use dioxus::prelude::*;
use ui::icons::{FaBell, FaMagnifyingGlass, FaUserPlus};
use ui::views::{AlertModal, PendingIndicator};
use ui::{use_session, Icon};

use crate::views::Protected;
use crate::Route;

#[component]
pub fn TrainerDashboard() -> Element {
    rsx! {
        Protected { required: Role::Trainer,
            DashboardPage {}
        }
    }
}

#[component]
fn DashboardPage() -> Element {
    let session = use_session();
    let mut reload = use_signal(|| 0u32);
    let mut search = use_signal(String::new);
    let mut alert = use_signal(|| Option::<String>::None);

    let clients = use_resource(move || async move {
        reload();
        api::list_clients().await
    });
    let stats = use_resource(move || async move {
        reload();
        api::trainer_stats().await.unwrap_or_default()
    });
    let pending = use_resource(|| async move { api::pending_request_count().await.unwrap_or(0) });

    let greeting = session
        .state()
        .profile
        .map(|p| p.first_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "coach".to_string());
    let stats: TrainerStats = stats().unwrap_or_default();
    let pending = pending().unwrap_or(0);

    let on_assigned = move |summary: ClientSummary| {
        tracing::info!(client = %summary.id, "athlete assigned");
        reload += 1;
    };

    rsx! {
        div { class: "dashboard-header",
            div {
                h1 { "Welcome back, {greeting}" }
                p { class: "muted", "Your athletes at a glance." }
            }
            Link { class: "request-badge", to: Route::TrainerRequests {},
                Icon { icon: FaBell, width: 16, height: 16 }
                span { "Requests" }
                if pending > 0 {
                    span { class: "badge", "{pending}" }
                }
            }
        }

        div { class: "stat-grid",
            div { class: "card stat",
                span { class: "stat-value", "{stats.total_clients}" }
                span { class: "muted", "Active athletes" }
            }
            div { class: "card stat",
                span { class: "stat-value", "{stats.workout_plans}" }
                span { class: "muted", "Workout plans" }
            }
            div { class: "card stat",
                span { class: "stat-value", "{stats.diet_plans}" }
                span { class: "muted", "Diet plans" }
            }
        }

        AssignClientForm {
            on_assigned,
            on_error: move |message| alert.set(Some(message)),
        }

        div { class: "card",
            div { class: "card-header",
                h2 { class: "card-title", "My athletes" }
                label { class: "search",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    input {
                        placeholder: "Search by name",
                        value: "{search}",
                        oninput: move |evt: FormEvent| search.set(evt.value()),
                    }
                }
            }

            match clients() {
                None => rsx! { PendingIndicator {} },
                Some(Err(e)) => rsx! { p { class: "notice-error", "Could not load athletes: {e}" } },
                Some(Ok(list)) => {
                    let term = search();
                    let visible: Vec<ClientSummary> =
                        list.into_iter().filter(|c| c.matches(&term)).collect();
                    rsx! {
                        if visible.is_empty() {
                            p { class: "muted", "No athletes found." }
                        }
                        ul { class: "client-list",
                            for client in visible {
                                ClientRow { key: "{client.id}", client }
                            }
                        }
                    }
                }
            }
        }

        if let Some(message) = alert() {
            AlertModal { message, on_close: move |_| alert.set(None) }
        }
    }
}

#[component]
fn ClientRow(client: ClientSummary) -> Element {
    let name = client.full_name();
    let goal = client
        .fitness_goal
        .as_deref()
        .map(FitnessGoal::label_for)
        .unwrap_or_else(|| "No goal set".to_string());
    let plan = client
        .active_plan_name
        .clone()
        .unwrap_or_else(|| "No active plan".to_string());

    rsx! {
        li { class: "client-row",
            Link { to: Route::ClientManagement { client_id: client.id },
                div { class: "client-name", "{name}" }
                div { class: "muted", "{client.email}" }
                div { class: "client-meta",
                    span { "{goal}" }
                    span { "{plan}" }
                }
            }
        }
    }
}

#[component]
fn AssignClientForm(on_assigned: EventHandler<ClientSummary>, on_error: EventHandler<String>) -> Element {
    let mut email = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            let value = email().trim().to_string();
            if value.is_empty() {
                return;
            }
            busy.set(true);
            match api::assign_client(value).await {
                Ok(summary) => {
                    email.set(String::new());
                    on_assigned.call(summary);
                }
                Err(e) => on_error.call(e.to_string()),
            }
            busy.set(false);
        }
    };

    rsx! {
        form { class: "card form-row assign-form", onsubmit: on_submit,
            label { class: "field",
                span { "Add an athlete by email" }
                input {
                    r#type: "email",
                    placeholder: "athlete@example.com",
                    value: "{email}",
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
            }
            button { class: "btn btn-primary", r#type: "submit", disabled: busy(),
                Icon { icon: FaUserPlus, width: 14, height: 14 }
                "Assign"
            }
        }
    }
}
