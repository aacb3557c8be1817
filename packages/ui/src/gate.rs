//! Access decisions for guarded routes and the role → landing mapping.
//!
//! [`decide`] is evaluated on every render of a guarded route from the current
//! [`SessionState`]; it never calls the backend. First match wins:
//!
//! 1. session still loading → [`GateDecision::Pending`]
//! 2. no identity → redirect to [`Landing::Login`]
//! 3. a role is required and the profile's role differs (or is unknown) → redirect to the
//!    landing of the actual role, [`Landing::Home`] when unknown
//! 4. otherwise → [`GateDecision::Render`]

use api::{Profile, Role};

use crate::session::SessionState;

/// Where a user is sent after sign-in or after being turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Home,
    Login,
    TrainerDashboard,
    ClientDashboard,
}

impl Landing {
    pub fn path(&self) -> &'static str {
        match self {
            Landing::Home => "/",
            Landing::Login => "/login-cliente",
            Landing::TrainerDashboard => "/trainer-dashboard",
            Landing::ClientDashboard => "/client-dashboard",
        }
    }

    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Trainer => Landing::TrainerDashboard,
            Role::Client => Landing::ClientDashboard,
        }
    }
}

/// Dashboard of the profile's role, home when the role is unknown.
pub fn landing_for(profile: Option<&Profile>) -> Landing {
    profile
        .map(|p| Landing::for_role(p.role))
        .unwrap_or(Landing::Home)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pending,
    Redirect(Landing),
    Render,
}

pub fn decide(state: &SessionState, required: Option<Role>) -> GateDecision {
    if state.loading {
        return GateDecision::Pending;
    }
    if state.identity.is_none() {
        return GateDecision::Redirect(Landing::Login);
    }
    if let Some(required) = required {
        if state.profile.as_ref().map(|p| p.role) != Some(required) {
            return GateDecision::Redirect(landing_for(state.profile.as_ref()));
        }
    }
    GateDecision::Render
}

/// Remembers the redirect a guard last reported.
///
/// A guard keeps re-rendering until its navigation lands; [`RedirectLog::record`] yields the
/// landing only the first time, and forgets it once the guard stops redirecting.
#[derive(Debug, Default)]
pub struct RedirectLog {
    last: Option<Landing>,
}

impl RedirectLog {
    pub fn record(&mut self, decision: GateDecision) -> Option<Landing> {
        match decision {
            GateDecision::Redirect(landing) if self.last == Some(landing) => None,
            GateDecision::Redirect(landing) => {
                self.last = Some(landing);
                Some(landing)
            }
            GateDecision::Pending | GateDecision::Render => {
                self.last = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use api::{Identity, Uuid};

    use super::*;

    fn identity() -> Identity {
        Identity {
            id: Uuid::from_u128(1),
            email: "someone@example.com".to_string(),
        }
    }

    fn profile(role: Role) -> Profile {
        Profile {
            id: Uuid::from_u128(1),
            email: "someone@example.com".to_string(),
            role,
            first_name: "Some".to_string(),
            last_name: "One".to_string(),
            phone: String::new(),
            bio: None,
            profile_image_url: None,
        }
    }

    fn state(identity: Option<Identity>, profile: Option<Profile>, loading: bool) -> SessionState {
        SessionState {
            identity,
            profile,
            loading,
        }
    }

    const REQUIREMENTS: [Option<Role>; 3] = [None, Some(Role::Client), Some(Role::Trainer)];

    #[test]
    fn loading_always_waits() {
        let states = [
            state(None, None, true),
            state(Some(identity()), None, true),
            state(Some(identity()), Some(profile(Role::Client)), true),
        ];
        for s in &states {
            for required in REQUIREMENTS {
                assert_eq!(decide(s, required), GateDecision::Pending);
            }
        }
    }

    #[test]
    fn anonymous_users_go_to_login() {
        for required in REQUIREMENTS {
            assert_eq!(
                decide(&state(None, None, false), required),
                GateDecision::Redirect(Landing::Login)
            );
        }
    }

    #[test]
    fn matching_role_renders() {
        for role in [Role::Client, Role::Trainer] {
            let s = state(Some(identity()), Some(profile(role)), false);
            assert_eq!(decide(&s, Some(role)), GateDecision::Render);
            assert_eq!(decide(&s, None), GateDecision::Render);
        }
    }

    #[test]
    fn wrong_role_goes_to_own_dashboard_never_login() {
        let trainer = state(Some(identity()), Some(profile(Role::Trainer)), false);
        assert_eq!(
            decide(&trainer, Some(Role::Client)),
            GateDecision::Redirect(Landing::TrainerDashboard)
        );

        let client = state(Some(identity()), Some(profile(Role::Client)), false);
        assert_eq!(
            decide(&client, Some(Role::Trainer)),
            GateDecision::Redirect(Landing::ClientDashboard)
        );
    }

    #[test]
    fn unknown_role_goes_home() {
        let s = state(Some(identity()), None, false);
        assert_eq!(
            decide(&s, Some(Role::Client)),
            GateDecision::Redirect(Landing::Home)
        );
        assert_eq!(decide(&s, None), GateDecision::Render);
    }

    #[test]
    fn repeated_redirect_is_reported_once() {
        let mut log = RedirectLog::default();
        let denied = GateDecision::Redirect(Landing::TrainerDashboard);

        assert_eq!(log.record(denied), Some(Landing::TrainerDashboard));
        assert_eq!(log.record(denied), None);
        assert_eq!(log.record(denied), None);

        assert_eq!(
            log.record(GateDecision::Redirect(Landing::Login)),
            Some(Landing::Login)
        );

        assert_eq!(log.record(GateDecision::Render), None);
        assert_eq!(log.record(denied), Some(Landing::TrainerDashboard));
    }

    #[test]
    fn landing_paths() {
        assert_eq!(landing_for(None).path(), "/");
        assert_eq!(landing_for(Some(&profile(Role::Trainer))).path(), "/trainer-dashboard");
        assert_eq!(Landing::for_role(Role::Client).path(), "/client-dashboard");
        assert_eq!(Landing::Login.path(), "/login-cliente");
    }
}
