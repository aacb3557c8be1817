use api::Role;
use dioxus::prelude::*;
use ui::{use_session, Navbar, SignOutButton};

use crate::Route;

/// Navbar plus the routed page for the signed-in areas.
#[component]
pub fn AppShell() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let role = session.state().profile.map(|p| p.role);

    rsx! {
        Navbar {
            match role {
                Some(Role::Trainer) => rsx! {
                    Link { to: Route::TrainerDashboard {}, "Dashboard" }
                    Link { to: Route::TrainerRequests {}, "Requests" }
                    Link { to: Route::TrainerProfile {}, "Profile" }
                },
                Some(Role::Client) => rsx! {
                    Link { to: Route::ClientDashboard {}, "Dashboard" }
                    Link { to: Route::ClientProfile {}, "Profile" }
                },
                None => rsx! {},
            }
            SignOutButton {
                on_signed_out: move |_| {
                    nav.replace(Route::Home {});
                },
            }
        }
        main { class: "page",
            Outlet::<Route> {}
        }
    }
}
