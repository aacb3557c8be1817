use dioxus::prelude::*;

use crate::icons::FaSpinner;
use crate::Icon;

/// Placeholder rendered while something the page depends on is still loading.
#[component]
pub fn PendingIndicator(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div { class: "pending",
            span { class: "pending-spinner",
                Icon { icon: FaSpinner, width: 18, height: 18 }
            }
            span { "{label}" }
        }
    }
}
