use api::validate::validate_sign_up;
use api::{FitnessGoal, Role, SignUpForm};
use dioxus::prelude::*;
use ui::{use_session, AuthEvent, Landing};

use crate::views::route_for;
use crate::Route;

/// Two-step registration: pick the account type, then fill in the form.
#[component]
pub fn Register() -> Element {
    let mut role = use_signal(|| Option::<Role>::None);

    rsx! {
        div { class: "auth-page",
            h1 { class: "auth-title", "Create your account" }

            match role() {
                None => rsx! {
                    p { class: "muted", "What kind of account do you need?" }
                    div { class: "portal-choice",
                        button {
                            class: "portal-card",
                            onclick: move |_| role.set(Some(Role::Client)),
                            h3 { "Athlete" }
                            p { class: "muted", "Follow the plans your trainer prepares for you." }
                        }
                        button {
                            class: "portal-card",
                            onclick: move |_| role.set(Some(Role::Trainer)),
                            h3 { "Trainer" }
                            p { class: "muted", "Build workouts and diets for your athletes." }
                        }
                    }
                },
                Some(chosen) => rsx! {
                    RegisterForm { role: chosen, on_back: move |_| role.set(None) }
                },
            }

            p { class: "muted",
                "Already registered? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}

#[component]
fn RegisterForm(role: Role, on_back: EventHandler<()>) -> Element {
    let session = use_session();
    let nav = use_navigator();

    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut password_confirm = use_signal(String::new);
    let mut goal = use_signal(|| FitnessGoal::ALL[0]);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let form = SignUpForm {
                email: email(),
                password: password(),
                password_confirm: password_confirm(),
                first_name: first_name().trim().to_string(),
                last_name: last_name().trim().to_string(),
                phone: phone().trim().to_string(),
                role,
                fitness_goal: (role == Role::Client).then(|| goal()),
            };
            if let Err(message) = validate_sign_up(&form) {
                error.set(Some(message));
                return;
            }

            loading.set(true);
            match api::sign_up(form).await {
                Ok(signed_in) => {
                    session.announce(AuthEvent::SignedIn, Some(signed_in.identity));
                    nav.replace(route_for(Landing::for_role(signed_in.role)));
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let heading = match role {
        Role::Client => "Athlete registration",
        Role::Trainer => "Trainer registration",
    };

    rsx! {
        form { class: "auth-form", onsubmit: handle_submit,
            div { class: "auth-form-header",
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| on_back.call(()),
                    "Back"
                }
                h2 { "{heading}" }
            }

            if let Some(err) = error() {
                div { class: "auth-error", "{err}" }
            }

            div { class: "form-row",
                label { class: "field",
                    span { "First name" }
                    input {
                        value: "{first_name}",
                        oninput: move |evt: FormEvent| first_name.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Last name" }
                    input {
                        value: "{last_name}",
                        oninput: move |evt: FormEvent| last_name.set(evt.value()),
                    }
                }
            }

            label { class: "field",
                span { "Email" }
                input {
                    r#type: "email",
                    autocomplete: "email",
                    value: "{email}",
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
            }
            label { class: "field",
                span { "Phone (optional)" }
                input {
                    r#type: "tel",
                    value: "{phone}",
                    oninput: move |evt: FormEvent| phone.set(evt.value()),
                }
            }

            if role == Role::Client {
                label { class: "field",
                    span { "Main goal" }
                    select {
                        onchange: move |evt: FormEvent| {
                            let value = evt.value();
                            if let Some(g) = FitnessGoal::ALL.iter().find(|g| g.as_str() == value) {
                                goal.set(*g);
                            }
                        },
                        for g in FitnessGoal::ALL {
                            option { value: g.as_str(), selected: g == goal(), {g.label()} }
                        }
                    }
                }
            }

            div { class: "form-row",
                label { class: "field",
                    span { "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{password}",
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Confirm password" }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{password_confirm}",
                        oninput: move |evt: FormEvent| password_confirm.set(evt.value()),
                    }
                }
            }

            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Creating account..." } else { "Create account" }
            }
        }
    }
}
