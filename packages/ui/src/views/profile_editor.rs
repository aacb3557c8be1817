use api::validate::{normalize_email, validate_password};
use api::ProfileUpdate;
use dioxus::prelude::*;

use crate::auth_events::AuthEvent;
use crate::provider::use_session;
use crate::views::{AlertModal, PendingIndicator, VIEWS_CSS};

/// Shared profile page body.
///
/// Platform pages choose the editable sections via props; the role is shown but never editable.
#[component]
pub fn ProfileEditor(
    /// Show phone and bio fields.
    #[props(default)]
    show_contact: bool,
) -> Element {
    let session = use_session();
    let state = session.state();

    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut bio = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut password_confirm = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut alert = use_signal(|| Option::<String>::None);
    let mut loaded = use_signal(|| false);

    // Fill the form once; later session refreshes must not overwrite what the user is typing.
    use_effect(move || {
        let Some(profile) = session.state().profile else {
            return;
        };
        if *loaded.peek() {
            return;
        }
        first_name.set(profile.first_name.clone());
        last_name.set(profile.last_name.clone());
        phone.set(profile.phone.clone());
        bio.set(profile.bio.clone().unwrap_or_default());
        email.set(profile.email.clone());
        loaded.set(true);
    });

    let Some(profile) = state.profile.clone() else {
        return rsx! { PendingIndicator {} };
    };
    let role_label = profile.role.label();

    let current_email = profile.email.clone();
    let on_save = move |evt: FormEvent| {
        evt.prevent_default();
        let current_email = current_email.clone();
        async move {
            notice.set(None);
            let new_password = password();
            if !new_password.is_empty() {
                if new_password != password_confirm() {
                    alert.set(Some("Passwords do not match".to_string()));
                    return;
                }
                if let Err(e) = validate_password(&new_password) {
                    alert.set(Some(e));
                    return;
                }
            }
            let new_email = match normalize_email(&email()) {
                Ok(e) => e,
                Err(e) => {
                    alert.set(Some(e));
                    return;
                }
            };

            saving.set(true);
            let update = ProfileUpdate {
                first_name: first_name(),
                last_name: last_name(),
                phone: show_contact.then(|| phone()),
                bio: show_contact.then(|| bio()),
            };
            if let Err(e) = api::update_profile(update).await {
                saving.set(false);
                alert.set(Some(e.to_string()));
                return;
            }

            let email_change = (new_email != current_email).then_some(new_email);
            let password_change = (!new_password.is_empty()).then_some(new_password);
            let identity = if email_change.is_some() || password_change.is_some() {
                match api::update_identity(email_change, password_change).await {
                    Ok(identity) => Some(identity),
                    Err(e) => {
                        saving.set(false);
                        alert.set(Some(e.to_string()));
                        return;
                    }
                }
            } else {
                session.peek_state().identity
            };

            password.set(String::new());
            password_confirm.set(String::new());
            saving.set(false);
            notice.set(Some("Profile updated".to_string()));
            session.announce(AuthEvent::TokenRefreshed, identity);
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        form { class: "card profile-editor", onsubmit: on_save,
            h2 { class: "card-title", "My profile" }
            p { class: "muted", "Account type: {role_label}" }

            div { class: "form-row",
                label { class: "field",
                    span { "First name" }
                    input {
                        value: "{first_name}",
                        oninput: move |e| first_name.set(e.value()),
                    }
                }
                label { class: "field",
                    span { "Last name" }
                    input {
                        value: "{last_name}",
                        oninput: move |e| last_name.set(e.value()),
                    }
                }
            }

            if show_contact {
                label { class: "field",
                    span { "Phone" }
                    input {
                        r#type: "tel",
                        value: "{phone}",
                        oninput: move |e| phone.set(e.value()),
                    }
                }
                label { class: "field",
                    span { "Bio" }
                    textarea {
                        rows: 3,
                        value: "{bio}",
                        oninput: move |e| bio.set(e.value()),
                    }
                }
            }

            label { class: "field",
                span { "Email" }
                input {
                    r#type: "email",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
            }

            div { class: "form-row",
                label { class: "field",
                    span { "New password" }
                    input {
                        r#type: "password",
                        placeholder: "Leave empty to keep the current one",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                }
                label { class: "field",
                    span { "Confirm password" }
                    input {
                        r#type: "password",
                        value: "{password_confirm}",
                        oninput: move |e| password_confirm.set(e.value()),
                    }
                }
            }

            if let Some(message) = notice() {
                p { class: "notice-success", "{message}" }
            }

            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: saving(),
                if saving() { "Saving..." } else { "Save changes" }
            }
        }

        if let Some(message) = alert() {
            AlertModal { message, on_close: move |_| alert.set(None) }
        }
    }
}
