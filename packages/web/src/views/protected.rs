//! Route guard for the signed-in areas.

use std::cell::RefCell;
use std::rc::Rc;

use api::Role;
use dioxus::prelude::*;
use ui::views::PendingIndicator;
use ui::{decide, use_session, GateDecision, Landing, RedirectLog};

use crate::Route;

pub fn route_for(landing: Landing) -> Route {
    match landing {
        Landing::Home => Route::Home {},
        Landing::Login => Route::LoginClient {},
        Landing::TrainerDashboard => Route::TrainerDashboard {},
        Landing::ClientDashboard => Route::ClientDashboard {},
    }
}

/// Renders `children` only for a signed-in user holding `required` (any role when absent).
#[component]
pub fn Protected(required: Option<Role>, children: Element) -> Element {
    let session = use_session();
    let nav = use_navigator();
    let redirects = use_hook(|| Rc::new(RefCell::new(RedirectLog::default())));

    let state = session.state();
    let decision = decide(&state, required);
    if let Some(landing) = redirects.borrow_mut().record(decision) {
        match &state.identity {
            Some(identity) => tracing::warn!(
                user = %identity.id,
                required = ?required,
                actual = ?state.profile.as_ref().map(|p| p.role),
                to = landing.path(),
                "access denied, redirecting"
            ),
            None => tracing::debug!(to = landing.path(), "not signed in, redirecting"),
        }
    }

    match decision {
        GateDecision::Pending => rsx! {
            PendingIndicator {}
        },
        GateDecision::Redirect(landing) => {
            nav.replace(route_for(landing));
            rsx! {}
        }
        GateDecision::Render => rsx! {
            {children}
        },
    }
}
