//! This crate contains all shared UI for the workspace: the session provider and its event
//! bus, the access-gate decision, and the widgets the pages have in common.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod auth_events;
pub use auth_events::{AuthEvent, AuthEventBus, Subscription};

pub mod gate;
pub use gate::{decide, landing_for, GateDecision, Landing, RedirectLog};

pub mod session;
pub use session::{SessionState, SessionStore};

mod provider;
pub use provider::{use_session, SessionConfig, SessionHandle, SessionProvider};

mod mirror;
pub use mirror::make_mirror;

pub mod views;

mod navbar;
pub use navbar::Navbar;

mod sign_out;
pub use sign_out::SignOutButton;
