//! Blocking alert and confirmation dialogs.

use dioxus::prelude::*;

use super::ModalOverlay;

/// Shows a failed operation's message until dismissed.
#[component]
pub fn AlertModal(message: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        ModalOverlay { on_close,
            div { class: "modal-body",
                h3 { class: "modal-title", "Something went wrong" }
                p { class: "modal-message", "{message}" }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_close.call(()),
                        "OK"
                    }
                }
            }
        }
    }
}

#[component]
pub fn ConfirmModal(
    message: String,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay { on_close: on_cancel,
            div { class: "modal-body",
                p { class: "modal-message", "{message}" }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
