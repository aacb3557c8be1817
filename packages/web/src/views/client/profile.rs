use api::Role;
use dioxus::prelude::*;
use ui::views::ProfileEditor;

use crate::views::Protected;

#[component]
pub fn ClientProfile() -> Element {
    rsx! {
        Protected { required: Role::Client,
            ProfileEditor { show_contact: true }
        }
    }
}
