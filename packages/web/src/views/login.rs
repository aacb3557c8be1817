//! Sign-in pages: the portal choice and the athlete / trainer forms.

use api::Role;
use dioxus::prelude::*;
use ui::{landing_for, use_session, AuthEvent, Landing};

use crate::views::route_for;
use crate::Route;

/// Send visitors who already have a resolved session to their dashboard.
fn use_redirect_signed_in() {
    let session = use_session();
    let nav = use_navigator();
    let state = session.state();
    if !state.loading && state.identity.is_some() && state.profile.is_some() {
        nav.replace(route_for(landing_for(state.profile.as_ref())));
    }
}

#[component]
pub fn Login() -> Element {
    use_redirect_signed_in();

    rsx! {
        div { class: "auth-page",
            h1 { class: "auth-title", "Sign in" }
            p { class: "muted", "Choose your area:" }
            div { class: "portal-choice",
                Link { class: "portal-card", to: Route::LoginClient {},
                    h3 { "Athlete" }
                    p { class: "muted", "Your workouts, diet and progress." }
                }
                Link { class: "portal-card", to: Route::LoginTrainer {},
                    h3 { "Trainer" }
                    p { class: "muted", "Manage your athletes and their plans." }
                }
            }
            p { class: "muted",
                "No account yet? "
                Link { to: Route::Register {}, "Sign up" }
            }
        }
    }
}

#[component]
pub fn LoginClient() -> Element {
    rsx! {
        LoginForm { portal: Role::Client }
    }
}

#[component]
pub fn LoginTrainer() -> Element {
    rsx! {
        LoginForm { portal: Role::Trainer }
    }
}

#[component]
fn LoginForm(portal: Role) -> Element {
    use_redirect_signed_in();

    let session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || p.is_empty() {
                error.set(Some("Enter email and password".to_string()));
                return;
            }

            loading.set(true);
            match api::sign_in(e, p, Some(portal)).await {
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

    let (title, other_label, other_route) = match portal {
        Role::Client => ("Athlete sign-in", "Are you a trainer?", Route::LoginTrainer {}),
        Role::Trainer => ("Trainer sign-in", "Are you an athlete?", Route::LoginClient {}),
    };

    rsx! {
        div { class: "auth-page",
            h1 { class: "auth-title", "{title}" }

            form { class: "auth-form", onsubmit: handle_login,
                if let Some(err) = error() {
                    div { class: "auth-error", "{err}" }
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
                    span { "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p { class: "muted",
                "{other_label} "
                Link { to: other_route, "Switch area" }
            }
            p { class: "muted",
                "No account yet? "
                Link { to: Route::Register {}, "Sign up" }
            }
        }
    }
}
