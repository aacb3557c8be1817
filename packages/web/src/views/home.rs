use dioxus::prelude::*;
use ui::{landing_for, use_session};

use crate::views::route_for;
use crate::Route;

#[component]
pub fn Home() -> Element {
    let session = use_session();
    let state = session.state();
    let signed_in = !state.loading && state.identity.is_some();
    let dashboard = route_for(landing_for(state.profile.as_ref()));

    rsx! {
        div { class: "hero",
            h1 { class: "hero-title", "Underdogs Fitness" }
            p { class: "hero-subtitle",
                "Training plans, nutrition and progress tracking, shared between you and your coach."
            }

            if signed_in && state.profile.is_some() {
                div { class: "hero-actions",
                    Link { class: "btn btn-primary", to: dashboard, "Go to your dashboard" }
                }
            } else {
                div { class: "hero-actions",
                    Link { class: "btn btn-primary", to: Route::LoginClient {}, "Athlete area" }
                    Link { class: "btn btn-ghost", to: Route::LoginTrainer {}, "Trainer area" }
                }
                p { class: "muted",
                    "New here? "
                    Link { to: Route::Register {}, "Create an account" }
                }
            }
        }
    }
}
