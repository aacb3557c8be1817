//! Logging a training session against the athlete's plan.

use api::validate::{session_entries, SessionInput};
use api::{NaiveDate, Role, Uuid};
use dioxus::prelude::*;
use ui::views::{AlertModal, PendingIndicator};

use crate::views::{today, Protected};
use crate::Route;

#[component]
pub fn WorkoutPlan(id: Uuid) -> Element {
    rsx! {
        Protected { required: Role::Client,
            SessionPage { key: "{id}", plan_id: id }
        }
    }
}

#[component]
fn SessionPage(plan_id: Uuid) -> Element {
    let nav = use_navigator();
    let mut inputs = use_signal(Vec::<(Uuid, SessionInput)>::new);
    let mut date = use_signal(today);
    let mut saving = use_signal(|| false);
    let mut alert = use_signal(|| Option::<String>::None);

    let plan = use_resource(move || async move {
        let plan = api::get_workout_plan(plan_id).await?;
        inputs.set(
            plan.exercises
                .iter()
                .map(|e| (e.id, SessionInput::default()))
                .collect(),
        );
        Ok::<_, ServerFnError>(plan)
    });

    let on_save = move |_| async move {
        let entries = match session_entries(&inputs.read()) {
            Ok(entries) => entries,
            Err(message) => {
                alert.set(Some(message));
                return;
            }
        };
        saving.set(true);
        match api::log_workout_session(plan_id, date(), entries).await {
            Ok(()) => {
                tracing::info!(plan = %plan_id, "session logged");
                nav.replace(Route::ClientDashboard {});
            }
            Err(e) => {
                saving.set(false);
                alert.set(Some(e.to_string()));
            }
        }
    };

    let mut set_input = move |index: usize, weight: Option<String>, reps: Option<String>| {
        if let Some((_, input)) = inputs.write().get_mut(index) {
            if let Some(w) = weight {
                input.weight = w;
            }
            if let Some(r) = reps {
                input.reps = r;
            }
        }
    };

    rsx! {
        Link { class: "back-link", to: Route::ClientDashboard {}, "Back to dashboard" }

        match plan() {
            None => rsx! { PendingIndicator {} },
            Some(Err(e)) => rsx! { p { class: "notice-error", "{e}" } },
            Some(Ok(plan)) => rsx! {
                div { class: "card",
                    h1 { class: "card-title", "{plan.plan.name}" }
                    label { class: "field session-date",
                        span { "Session date" }
                        input {
                            r#type: "date",
                            value: "{date}",
                            oninput: move |evt: FormEvent| {
                                if let Ok(parsed) = NaiveDate::parse_from_str(&evt.value(), "%Y-%m-%d") {
                                    date.set(parsed);
                                }
                            },
                        }
                    }

                    if plan.exercises.is_empty() {
                        p { class: "muted", "Your trainer has not added any exercises yet." }
                    }
                    for (index, exercise) in plan.exercises.iter().cloned().enumerate() {
                        div { key: "{exercise.id}", class: "session-exercise",
                            div {
                                div { class: "item-name", "{exercise.exercise_name}" }
                                div { class: "muted", "Target: {exercise.sets_reps}" }
                                if let Some(url) = exercise.video_url.clone().filter(|u| !u.is_empty()) {
                                    a { href: "{url}", target: "_blank", rel: "noopener", "Watch video" }
                                }
                            }
                            div { class: "form-row",
                                input {
                                    inputmode: "decimal",
                                    placeholder: "kg",
                                    value: inputs.read().get(index).map(|(_, i)| i.weight.clone()).unwrap_or_default(),
                                    oninput: move |evt: FormEvent| set_input(index, Some(evt.value()), None),
                                }
                                input {
                                    inputmode: "numeric",
                                    placeholder: "reps",
                                    value: inputs.read().get(index).map(|(_, i)| i.reps.clone()).unwrap_or_default(),
                                    oninput: move |evt: FormEvent| set_input(index, None, Some(evt.value())),
                                }
                            }
                        }
                    }

                    button {
                        class: "btn btn-primary",
                        disabled: saving() || plan.exercises.is_empty(),
                        onclick: on_save,
                        if saving() { "Saving..." } else { "Finish session" }
                    }
                }
            },
        }

        if let Some(message) = alert() {
            AlertModal { message, on_close: move |_| alert.set(None) }
        }
    }
}
