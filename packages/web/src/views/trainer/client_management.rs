//! One athlete seen by their trainer: workout plan, diet, weight trend and recent sessions.
//!
//! Exercises and diet items are shown from the local mirror first and replaced by the server
//! copy once it arrives. Every mutation writes the mirror again after the server accepted it.

use api::{DietItem, Exercise, NewExercise, Role, Uuid};
use dioxus::prelude::*;
use store::MirrorKey;
use ui::icons::{FaArrowLeft, FaPlus, FaTrash};
use ui::views::{AlertModal, ConfirmModal, PendingIndicator, WeightTrend};
use ui::{use_session, Icon};

use crate::views::{user_mirror, Protected};
use crate::Route;

#[component]
pub fn ClientManagement(client_id: Uuid) -> Element {
    rsx! {
        Protected { required: Role::Trainer,
            ManagementPage { key: "{client_id}", client_id }
        }
    }
}

/// Something the trainer asked to remove, waiting for confirmation.
#[derive(Clone, Copy, PartialEq)]
enum Removal {
    Exercise(Uuid),
    DietItem(Uuid),
}

#[component]
fn ManagementPage(client_id: Uuid) -> Element {
    let session = use_session();
    let exercises_key = MirrorKey::exercises(client_id);
    let diet_key = MirrorKey::diet(client_id);

    let mut exercises = use_signal({
        let key = exercises_key.clone();
        move || user_mirror(&session).load::<Vec<Exercise>>(&key).unwrap_or_default()
    });
    let mut diet = use_signal({
        let key = diet_key.clone();
        move || user_mirror(&session).load::<Vec<DietItem>>(&key).unwrap_or_default()
    });
    let mut alert = use_signal(|| Option::<String>::None);
    let mut removal = use_signal(|| Option::<Removal>::None);

    let profile = use_resource(move || async move { api::get_client_profile(client_id).await });
    let weights = use_resource(move || async move {
        api::list_weight_entries(client_id).await.unwrap_or_default()
    });
    let logs = use_resource(move || async move {
        api::recent_exercise_logs(client_id).await.unwrap_or_default()
    });

    let _sync = use_resource({
        let exercises_key = exercises_key.clone();
        let diet_key = diet_key.clone();
        move || {
            let exercises_key = exercises_key.clone();
            let diet_key = diet_key.clone();
            async move {
                let mirror = user_mirror(&session);
                match api::get_active_plan(client_id).await {
                    Ok(plan) => {
                        let list = plan.map(|p| p.exercises).unwrap_or_default();
                        mirror.save(&exercises_key, &list);
                        exercises.set(list);
                    }
                    Err(e) => tracing::warn!("workout plan not refreshed: {e}"),
                }
                match api::list_diet_items(client_id).await {
                    Ok(items) => {
                        mirror.save(&diet_key, &items);
                        diet.set(items);
                    }
                    Err(e) => tracing::warn!("diet not refreshed: {e}"),
                }
            }
        }
    });

    let on_exercise_added = {
        let key = exercises_key.clone();
        move |exercise: Exercise| {
            exercises.write().push(exercise);
            user_mirror(&session).save(&key, &*exercises.peek());
        }
    };
    let on_diet_added = {
        let key = diet_key.clone();
        move |item: DietItem| {
            diet.write().push(item);
            user_mirror(&session).save(&key, &*diet.peek());
        }
    };

    let confirm_removal = move |_| {
        let exercises_key = exercises_key.clone();
        let diet_key = diet_key.clone();
        async move {
            let Some(target) = removal.take() else {
                return;
            };
            let mirror = user_mirror(&session);
            match target {
                Removal::Exercise(id) => match api::delete_exercise(id).await {
                    Ok(()) => {
                        exercises.write().retain(|e| e.id != id);
                        mirror.save(&exercises_key, &*exercises.peek());
                    }
                    Err(e) => alert.set(Some(e.to_string())),
                },
                Removal::DietItem(id) => match api::delete_diet_item(id).await {
                    Ok(()) => {
                        diet.write().retain(|d| d.id != id);
                        mirror.save(&diet_key, &*diet.peek());
                    }
                    Err(e) => alert.set(Some(e.to_string())),
                },
            }
        }
    };

    rsx! {
        Link { class: "back-link", to: Route::TrainerDashboard {},
            Icon { icon: FaArrowLeft, width: 12, height: 12 }
            "All athletes"
        }

        match profile() {
            None => rsx! { PendingIndicator {} },
            Some(Err(e)) => rsx! { p { class: "notice-error", "{e}" } },
            Some(Ok(profile)) => {
                let name = profile.display_name();
                let bio = profile.bio.clone().unwrap_or_default();
                rsx! {
                    div { class: "dashboard-header",
                        div {
                            h1 { "{name}" }
                            p { class: "muted", "{profile.email}" }
                            if !bio.is_empty() {
                                p { class: "muted", "{bio}" }
                            }
                        }
                    }
                }
            }
        }

        div { class: "two-columns",
            div { class: "card",
                h2 { class: "card-title", "Workout plan" }
                if exercises.read().is_empty() {
                    p { class: "muted", "No exercises yet." }
                }
                ul { class: "item-list",
                    for exercise in exercises.read().iter().cloned() {
                        li { key: "{exercise.id}", class: "item-row",
                            div {
                                div { class: "item-name", "{exercise.exercise_name}" }
                                div { class: "muted", "{exercise.sets_reps}" }
                                if let Some(url) = exercise.video_url.clone().filter(|u| !u.is_empty()) {
                                    a { href: "{url}", target: "_blank", rel: "noopener", "Video" }
                                }
                            }
                            button {
                                class: "btn btn-ghost",
                                title: "Remove exercise",
                                onclick: move |_| removal.set(Some(Removal::Exercise(exercise.id))),
                                Icon { icon: FaTrash, width: 12, height: 12 }
                            }
                        }
                    }
                }
                AddExerciseForm {
                    client_id,
                    on_added: on_exercise_added,
                    on_error: move |message| alert.set(Some(message)),
                }
            }

            div { class: "card",
                h2 { class: "card-title", "Diet" }
                if diet.read().is_empty() {
                    p { class: "muted", "No meals yet." }
                }
                ul { class: "item-list",
                    for item in diet.read().iter().cloned() {
                        li { key: "{item.id}", class: "item-row",
                            div {
                                div { class: "item-name", "{item.meal_name}" }
                                div { class: "muted", "{item.description}" }
                            }
                            button {
                                class: "btn btn-ghost",
                                title: "Remove meal",
                                onclick: move |_| removal.set(Some(Removal::DietItem(item.id))),
                                Icon { icon: FaTrash, width: 12, height: 12 }
                            }
                        }
                    }
                }
                AddDietItemForm {
                    client_id,
                    on_added: on_diet_added,
                    on_error: move |message| alert.set(Some(message)),
                }
            }
        }

        div { class: "two-columns",
            div { class: "card",
                h2 { class: "card-title", "Weight" }
                WeightTrend { entries: weights().unwrap_or_default() }
            }
            div { class: "card",
                h2 { class: "card-title", "Recent sessions" }
                match logs() {
                    None => rsx! { PendingIndicator {} },
                    Some(list) if list.is_empty() => rsx! { p { class: "muted", "No sessions logged yet." } },
                    Some(list) => rsx! {
                        ul { class: "item-list",
                            for log in list {
                                SessionLogRow { key: "{log.id}", log }
                            }
                        }
                    },
                }
            }
        }

        if removal().is_some() {
            ConfirmModal {
                message: "Remove this item from the athlete's plan?",
                confirm_label: "Remove",
                on_confirm: confirm_removal,
                on_cancel: move |_| removal.set(None),
            }
        }

        if let Some(message) = alert() {
            AlertModal { message, on_close: move |_| alert.set(None) }
        }
    }
}

#[component]
fn SessionLogRow(log: api::ExerciseLog) -> Element {
    let name = log.exercise_name.clone().unwrap_or_else(|| "Exercise".to_string());
    let date = log.logged_at.format("%d/%m/%Y").to_string();
    rsx! {
        li { class: "item-row",
            div {
                div { class: "item-name", "{name}" }
                div { class: "muted", "{date}" }
            }
            span { "{log.weight} kg x {log.reps_actual}" }
        }
    }
}

#[component]
fn AddExerciseForm(
    client_id: Uuid,
    on_added: EventHandler<Exercise>,
    on_error: EventHandler<String>,
) -> Element {
    let mut name = use_signal(String::new);
    let mut sets_reps = use_signal(String::new);
    let mut video_url = use_signal(String::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            if name().trim().is_empty() {
                on_error.call("Enter the exercise name".to_string());
                return;
            }
            let exercise = NewExercise {
                name: name(),
                sets_reps: sets_reps(),
                video_url: video_url(),
            };
            match api::add_exercise(client_id, exercise).await {
                Ok(created) => {
                    name.set(String::new());
                    sets_reps.set(String::new());
                    video_url.set(String::new());
                    on_added.call(created);
                }
                Err(e) => on_error.call(e.to_string()),
            }
        }
    };

    rsx! {
        form { class: "inline-form", onsubmit: on_submit,
            div { class: "form-row",
                input {
                    placeholder: "Exercise",
                    value: "{name}",
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                input {
                    placeholder: "3x10",
                    value: "{sets_reps}",
                    oninput: move |evt: FormEvent| sets_reps.set(evt.value()),
                }
            }
            input {
                placeholder: "Video link (optional)",
                value: "{video_url}",
                oninput: move |evt: FormEvent| video_url.set(evt.value()),
            }
            button { class: "btn btn-primary", r#type: "submit",
                Icon { icon: FaPlus, width: 12, height: 12 }
                "Add exercise"
            }
        }
    }
}

#[component]
fn AddDietItemForm(
    client_id: Uuid,
    on_added: EventHandler<DietItem>,
    on_error: EventHandler<String>,
) -> Element {
    let mut meal = use_signal(String::new);
    let mut description = use_signal(String::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            if meal().trim().is_empty() || description().trim().is_empty() {
                on_error.call("Enter both the meal and what it contains".to_string());
                return;
            }
            match api::add_diet_item(client_id, meal(), description()).await {
                Ok(item) => {
                    meal.set(String::new());
                    description.set(String::new());
                    on_added.call(item);
                }
                Err(e) => on_error.call(e.to_string()),
            }
        }
    };

    rsx! {
        form { class: "inline-form", onsubmit: on_submit,
            input {
                placeholder: "Meal (e.g. Breakfast)",
                value: "{meal}",
                oninput: move |evt: FormEvent| meal.set(evt.value()),
            }
            textarea {
                rows: 2,
                placeholder: "Foods and quantities",
                value: "{description}",
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }
            button { class: "btn btn-primary", r#type: "submit",
                Icon { icon: FaPlus, width: 12, height: 12 }
                "Add meal"
            }
        }
    }
}
