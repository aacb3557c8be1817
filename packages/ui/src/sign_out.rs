use dioxus::prelude::*;

use crate::icons::FaRightFromBracket;
use crate::provider::use_session;
use crate::Icon;

/// Button that ends the session. Local state is cleared even when the server is unreachable.
#[component]
pub fn SignOutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "btn btn-ghost".to_string())] class: String,
    /// Called once the local session is cleared.
    #[props(default)]
    on_signed_out: EventHandler<()>,
) -> Element {
    let session = use_session();
    let mut busy = use_signal(|| false);

    let onclick = move |_| async move {
        busy.set(true);
        session.sign_out().await;
        busy.set(false);
        on_signed_out.call(());
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { "{label}" }
        }
    }
}
