//! Athlete home: today's plan and diet, weight, gym days, supplements and requests.

use api::validate::parse_weight;
use api::{
    day_name, toggle_supplement, DietItem, Exercise, Role, Uuid, WorkoutPlan as Plan, SUPPLEMENTS,
    WEEK,
};
use dioxus::prelude::*;
use store::MirrorKey;
use ui::icons::{FaCheck, FaPlay};
use ui::views::{AlertModal, ConfirmModal, WeightTrend};
use ui::{use_session, Icon};

use super::request_forms::RequestForms;
use crate::views::{today, user_mirror, Protected};
use crate::Route;

#[component]
pub fn ClientDashboard() -> Element {
    rsx! {
        Protected { required: Role::Client,
            DashboardPage {}
        }
    }
}

#[component]
fn DashboardPage() -> Element {
    let session = use_session();
    let mut alert = use_signal(|| Option::<String>::None);
    let on_error = move |message: String| alert.set(Some(message));

    let state = session.state();
    let Some(identity) = state.identity else {
        return rsx! {};
    };
    let first_name = state
        .profile
        .map(|p| p.first_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "athlete".to_string());

    rsx! {
        div { class: "dashboard-header",
            div {
                h1 { "Hi {first_name}" }
                p { class: "muted", "Here is what your trainer planned for you." }
            }
        }

        PlanCards { key: "{identity.id}", client_id: identity.id }

        div { class: "two-columns",
            WeightCard { client_id: identity.id, on_error }
            div {
                WeekTracker { on_error }
                SupplementChecklist { on_error }
            }
        }

        RequestForms { client_id: identity.id, on_error }

        if let Some(message) = alert() {
            AlertModal { message, on_close: move |_| alert.set(None) }
        }
    }
}

/// Workout plan and diet, read from the mirror first.
#[component]
fn PlanCards(client_id: Uuid) -> Element {
    let session = use_session();
    let mut exercises = use_signal(move || {
        user_mirror(&session)
            .load::<Vec<Exercise>>(&MirrorKey::exercises(client_id))
            .unwrap_or_default()
    });
    let mut diet = use_signal(move || {
        user_mirror(&session)
            .load::<Vec<DietItem>>(&MirrorKey::diet(client_id))
            .unwrap_or_default()
    });
    let mut plan = use_signal(|| Option::<Plan>::None);

    let _sync = use_resource(move || async move {
        let mirror = user_mirror(&session);
        match api::get_active_plan(client_id).await {
            Ok(Some(active)) => {
                mirror.save(&MirrorKey::exercises(client_id), &active.exercises);
                exercises.set(active.exercises);
                plan.set(Some(active.plan));
            }
            Ok(None) => {
                mirror.clear(&MirrorKey::exercises(client_id));
                exercises.set(Vec::new());
                plan.set(None);
            }
            Err(e) => tracing::warn!("workout plan not refreshed: {e}"),
        }
        match api::list_diet_items(client_id).await {
            Ok(items) => {
                mirror.save(&MirrorKey::diet(client_id), &items);
                diet.set(items);
            }
            Err(e) => tracing::warn!("diet not refreshed: {e}"),
        }
    });

    rsx! {
        div { class: "two-columns",
            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title",
                        {plan().map(|p| p.name).unwrap_or_else(|| "Workout plan".to_string())}
                    }
                    if let Some(active) = plan() {
                        Link {
                            class: "btn btn-primary",
                            to: Route::WorkoutPlan { id: active.id },
                            Icon { icon: FaPlay, width: 12, height: 12 }
                            "Start session"
                        }
                    }
                }
                if exercises.read().is_empty() {
                    p { class: "muted", "Your trainer has not assigned any exercises yet." }
                }
                ul { class: "item-list",
                    for exercise in exercises.read().iter().cloned() {
                        li { key: "{exercise.id}", class: "item-row",
                            div {
                                div { class: "item-name", "{exercise.exercise_name}" }
                                div { class: "muted", "{exercise.sets_reps}" }
                            }
                            if let Some(url) = exercise.video_url.clone().filter(|u| !u.is_empty()) {
                                a { href: "{url}", target: "_blank", rel: "noopener", "Video" }
                            }
                        }
                    }
                }
            }

            div { class: "card",
                h2 { class: "card-title", "Diet" }
                if diet.read().is_empty() {
                    p { class: "muted", "No meals planned yet." }
                }
                ul { class: "item-list",
                    for item in diet.read().iter().cloned() {
                        li { key: "{item.id}", class: "item-row",
                            div {
                                div { class: "item-name", "{item.meal_name}" }
                                div { class: "muted", "{item.description}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn WeightCard(client_id: Uuid, on_error: EventHandler<String>) -> Element {
    let mut input = use_signal(String::new);
    let mut confirm_clear = use_signal(|| false);
    let mut entries = use_resource(move || async move {
        api::list_weight_entries(client_id).await.unwrap_or_default()
    });

    let on_add = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            let weight = match parse_weight(&input()) {
                Ok(weight) => weight,
                Err(message) => {
                    on_error.call(message);
                    return;
                }
            };
            match api::add_weight_entry(weight).await {
                Ok(_) => {
                    input.set(String::new());
                    entries.restart();
                }
                Err(e) => on_error.call(e.to_string()),
            }
        }
    };

    let on_clear = move |_| async move {
        confirm_clear.set(false);
        match api::clear_weight_entries().await {
            Ok(()) => entries.restart(),
            Err(e) => on_error.call(e.to_string()),
        }
    };

    rsx! {
        div { class: "card",
            div { class: "card-header",
                h2 { class: "card-title", "Weight" }
                button { class: "btn btn-ghost", onclick: move |_| confirm_clear.set(true), "Clear history" }
            }
            WeightTrend { entries: entries().unwrap_or_default() }
            form { class: "form-row", onsubmit: on_add,
                input {
                    inputmode: "decimal",
                    placeholder: "Today's weight (kg)",
                    value: "{input}",
                    oninput: move |evt: FormEvent| input.set(evt.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Save" }
            }
        }

        if confirm_clear() {
            ConfirmModal {
                message: "Delete your whole weight history?",
                confirm_label: "Delete",
                on_confirm: on_clear,
                on_cancel: move |_| confirm_clear.set(false),
            }
        }
    }
}

/// Which days of the current week had a logged session.
#[component]
fn WeekTracker(on_error: EventHandler<String>) -> Element {
    let mut days = use_resource(|| async move { api::list_trained_days().await.unwrap_or_default() });

    let on_reset = move |_| async move {
        match api::reset_trained_days().await {
            Ok(()) => days.restart(),
            Err(e) => on_error.call(e.to_string()),
        }
    };

    let trained = days().unwrap_or_default();

    rsx! {
        div { class: "card",
            div { class: "card-header",
                h2 { class: "card-title", "Gym days" }
                button { class: "btn btn-ghost", onclick: on_reset, "New week" }
            }
            div { class: "week",
                for day in WEEK {
                    {
                        let name = day_name(day);
                        let done = trained.iter().any(|d| d == name);
                        rsx! {
                            div { key: "{name}", class: if done { "week-day done" } else { "week-day" },
                                span { "{name}" }
                                if done {
                                    Icon { icon: FaCheck, width: 10, height: 10 }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Today's supplements. The mirror answers first, then the server copy replaces it.
#[component]
fn SupplementChecklist(on_error: EventHandler<String>) -> Element {
    let session = use_session();
    let date = use_hook(today);
    let key = MirrorKey::supplements(date);

    let mut taken = use_signal({
        let key = key.clone();
        move || user_mirror(&session).load::<Vec<String>>(&key).unwrap_or_default()
    });

    let _sync = use_resource({
        let key = key.clone();
        move || {
            let key = key.clone();
            async move {
                match api::get_supplements(date).await {
                    Ok(list) => {
                        user_mirror(&session).save(&key, &list);
                        taken.set(list);
                    }
                    Err(e) => tracing::warn!("supplements not refreshed: {e}"),
                }
            }
        }
    });

    let toggle = move |id: &'static str| {
        let key = key.clone();
        async move {
            let updated = toggle_supplement(&taken.peek(), id);
            taken.set(updated.clone());
            user_mirror(&session).save(&key, &updated);
            if let Err(e) = api::set_supplements(date, updated).await {
                on_error.call(e.to_string());
            }
        }
    };

    rsx! {
        div { class: "card",
            h2 { class: "card-title", "Supplements" }
            p { class: "muted", "{date}" }
            ul { class: "item-list",
                for supplement in SUPPLEMENTS {
                    {
                        let checked = taken.read().iter().any(|s| s == supplement.id);
                        let mut toggle = toggle.clone();
                        rsx! {
                            li { key: "{supplement.id}", class: "item-row",
                                label { class: "checkbox",
                                    input {
                                        r#type: "checkbox",
                                        checked,
                                        onchange: move |_| toggle(supplement.id),
                                    }
                                    span { "{supplement.label}" }
                                }
                                span { class: "muted", "{supplement.dose}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
