use api::Role;
use dioxus::prelude::*;
use ui::views::ProfileEditor;

use crate::views::Protected;

#[component]
pub fn TrainerProfile() -> Element {
    rsx! {
        Protected { required: Role::Trainer,
            ProfileEditor {}
        }
    }
}
