//! # Session state and the flows that drive it
//!
//! [`SessionStore`] is the single owned copy of `(identity, profile, loading)` for the running
//! app. It is only written by the flows in this module ([`bootstrap`], [`on_auth_event`] and
//! [`sign_out`]), which the [`crate::SessionProvider`] runs; views read a [`SessionState`]
//! snapshot through [`crate::use_session`]. [`recheck`] only reads it and reports what the
//! provider should announce.
//!
//! ## Fetch generations
//!
//! Every identity change bumps a generation counter. A profile fetch is started with the
//! [`FetchTicket`] of the generation it belongs to and its result is applied only while that
//! generation is still current, so a slow fetch that resolves after a sign-out (or after a
//! different account signed in) is dropped instead of resurrecting a stale profile. Session
//! reads (bootstrap and the periodic re-check) are guarded the same way.
//!
//! ## Loading
//!
//! `loading` is true until the first session read resolves, and again while the profile of a
//! *newly seen* identity is in flight. Re-fetches for the same identity (token refresh) keep the
//! current profile on screen.

use std::future::Future;

use api::{Identity, Profile};
use dioxus::prelude::*;

use crate::auth_events::AuthEvent;

/// Generation a profile fetch was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Read-only view of the session handed to components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    identity: Option<Identity>,
    profile: Option<Profile>,
    generation: u64,
    bootstrapping: bool,
    awaiting_profile: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            identity: None,
            profile: None,
            generation: 0,
            bootstrapping: true,
            awaiting_profile: false,
        }
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            identity: self.identity.clone(),
            profile: self.profile.clone(),
            loading: self.bootstrapping || self.awaiting_profile,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Ticket of the current generation, for work that must not outlive an identity change.
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket(self.generation)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Record the session's identity and start a new generation.
    ///
    /// Returns the ticket for the profile fetch that must follow, or `None` when signed out.
    pub fn set_identity(&mut self, identity: Option<Identity>) -> Option<FetchTicket> {
        self.generation += 1;
        let Some(identity) = identity else {
            self.identity = None;
            self.profile = None;
            self.awaiting_profile = false;
            return None;
        };

        let changed = self.identity.as_ref().map(|i| i.id) != Some(identity.id);
        if changed {
            self.profile = None;
            self.awaiting_profile = true;
        }
        self.identity = Some(identity);
        Some(self.ticket())
    }

    /// Apply a fetched profile. Returns `false` when the ticket is stale and nothing changed.
    pub fn apply_profile(&mut self, ticket: FetchTicket, profile: Option<Profile>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale profile fetch"
            );
            return false;
        }
        self.profile = profile;
        self.awaiting_profile = false;
        true
    }

    /// Forget identity and profile.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.identity = None;
        self.profile = None;
        self.awaiting_profile = false;
    }

    /// Mark the initial session resolution as done.
    pub fn finish_loading(&mut self) {
        self.bootstrapping = false;
    }
}

/// Calls the flows need from the backend.
pub trait SessionBackend {
    fn current_session(&self) -> impl Future<Output = Result<Option<Identity>, ServerFnError>>;
    fn fetch_profile(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<Option<Profile>, ServerFnError>>;
    fn sign_out(&self) -> impl Future<Output = Result<(), ServerFnError>>;
}

/// The app's own server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerBackend;

impl SessionBackend for ServerBackend {
    async fn current_session(&self) -> Result<Option<Identity>, ServerFnError> {
        api::get_session().await
    }

    async fn fetch_profile(&self, _identity: &Identity) -> Result<Option<Profile>, ServerFnError> {
        api::get_my_profile().await
    }

    async fn sign_out(&self) -> Result<(), ServerFnError> {
        api::sign_out().await
    }
}

/// Somewhere the flows can write the store. Each update runs to completion before the next
/// await point, so no borrow is held across a backend call.
pub trait SessionSink {
    fn update<R>(&self, f: impl FnOnce(&mut SessionStore) -> R) -> R;
}

impl SessionSink for Signal<SessionStore> {
    fn update<R>(&self, f: impl FnOnce(&mut SessionStore) -> R) -> R {
        let mut signal = *self;
        let mut store = signal.write();
        f(&mut store)
    }
}

async fn load_profile<B: SessionBackend>(backend: &B, identity: &Identity) -> Option<Profile> {
    match backend.fetch_profile(identity).await {
        Ok(Some(profile)) if profile.id == identity.id => Some(profile),
        Ok(Some(profile)) => {
            tracing::error!(
                identity = %identity.id,
                profile = %profile.id,
                "profile does not belong to the session identity"
            );
            None
        }
        Ok(None) => {
            tracing::error!(identity = %identity.id, "no profile row for identity");
            None
        }
        Err(e) => {
            tracing::error!(identity = %identity.id, "profile fetch failed: {e}");
            None
        }
    }
}

async fn refresh_profile<B: SessionBackend, S: SessionSink>(
    backend: &B,
    sink: &S,
    identity: Identity,
) {
    let Some(ticket) = sink.update(|s| s.set_identity(Some(identity.clone()))) else {
        return;
    };
    let profile = load_profile(backend, &identity).await;
    sink.update(|s| s.apply_profile(ticket, profile));
}

/// Initial resolution: read the session once, load its profile, then leave the loading state
/// whatever the outcome.
pub async fn bootstrap<B: SessionBackend, S: SessionSink>(backend: &B, sink: &S) {
    let ticket = sink.update(|s| s.ticket());
    let session = match backend.current_session().await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("session read failed: {e}");
            None
        }
    };

    // An auth event handled meanwhile already knows better.
    if sink.update(|s| s.is_current(ticket)) {
        match session {
            Some(identity) => refresh_profile(backend, sink, identity).await,
            None => {
                sink.update(|s| s.set_identity(None));
            }
        }
    } else {
        tracing::debug!("session changed during bootstrap, keeping the newer state");
    }

    sink.update(|s| s.finish_loading());
}

/// React to a sign-in, sign-out or token refresh.
pub async fn on_auth_event<B: SessionBackend, S: SessionSink>(
    backend: &B,
    sink: &S,
    event: AuthEvent,
    session: Option<Identity>,
) {
    tracing::debug!(?event, signed_in = session.is_some(), "auth event");
    match session {
        Some(identity) => refresh_profile(backend, sink, identity).await,
        None => sink.update(|s| s.clear()),
    }
}

/// Sign out remotely, then clear local state even if the remote call failed.
pub async fn sign_out<B: SessionBackend, S: SessionSink>(backend: &B, sink: &S) {
    if let Err(e) = backend.sign_out().await {
        tracing::error!("remote sign-out failed, clearing local session anyway: {e}");
    }
    sink.update(|s| s.clear());
    tracing::info!("signed out");
}

/// Periodic re-read of the server session.
///
/// Returns the event to announce, or `None` when nothing changed, the read failed, or the
/// session moved on (sign-in, sign-out) while the read was in flight.
pub async fn recheck<B: SessionBackend, S: SessionSink>(
    backend: &B,
    sink: &S,
) -> Option<(AuthEvent, Option<Identity>)> {
    let (ticket, known, loading) = sink.update(|s| {
        (s.ticket(), s.identity().map(|i| i.id), s.snapshot().loading)
    });
    if loading {
        return None;
    }

    let session = match backend.current_session().await {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!("session re-check failed: {e}");
            return None;
        }
    };
    if !sink.update(|s| s.is_current(ticket)) {
        tracing::debug!("session changed during re-check, dropping the result");
        return None;
    }

    match session {
        Some(identity) if known == Some(identity.id) => {
            Some((AuthEvent::TokenRefreshed, Some(identity)))
        }
        Some(identity) => Some((AuthEvent::SignedIn, Some(identity))),
        None if known.is_some() => {
            tracing::info!("server session expired");
            Some((AuthEvent::SignedOut, None))
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::pin::pin;

    use api::{Role, Uuid};
    use tokio::sync::oneshot;

    use super::*;

    impl SessionSink for RefCell<SessionStore> {
        fn update<R>(&self, f: impl FnOnce(&mut SessionStore) -> R) -> R {
            f(&mut self.borrow_mut())
        }
    }

    fn identity(n: u128) -> Identity {
        Identity {
            id: Uuid::from_u128(n),
            email: format!("user{n}@example.com"),
        }
    }

    fn profile(n: u128, role: Role) -> Profile {
        Profile {
            id: Uuid::from_u128(n),
            email: format!("user{n}@example.com"),
            role,
            first_name: "Test".to_string(),
            last_name: format!("User{n}"),
            phone: String::new(),
            bio: None,
            profile_image_url: None,
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        session: Option<Identity>,
        session_fails: bool,
        profile: Option<Profile>,
        profile_fails: bool,
        sign_out_fails: bool,
        /// When set, the next profile fetch waits for this channel.
        gate: RefCell<Option<oneshot::Receiver<Option<Profile>>>>,
        /// When set, the next session read waits for this channel.
        session_gate: RefCell<Option<oneshot::Receiver<Option<Identity>>>>,
        sign_out_calls: RefCell<u32>,
    }

    impl SessionBackend for FakeBackend {
        async fn current_session(&self) -> Result<Option<Identity>, ServerFnError> {
            let gate = self.session_gate.borrow_mut().take();
            if let Some(rx) = gate {
                return Ok(rx.await.unwrap_or(None));
            }
            if self.session_fails {
                return Err(ServerFnError::new("network down"));
            }
            Ok(self.session.clone())
        }

        async fn fetch_profile(&self, _identity: &Identity) -> Result<Option<Profile>, ServerFnError> {
            let gate = self.gate.borrow_mut().take();
            if let Some(rx) = gate {
                return Ok(rx.await.unwrap_or(None));
            }
            if self.profile_fails {
                return Err(ServerFnError::new("permission denied"));
            }
            Ok(self.profile.clone())
        }

        async fn sign_out(&self) -> Result<(), ServerFnError> {
            *self.sign_out_calls.borrow_mut() += 1;
            if self.sign_out_fails {
                return Err(ServerFnError::new("network down"));
            }
            Ok(())
        }
    }

    fn store() -> RefCell<SessionStore> {
        RefCell::new(SessionStore::new())
    }

    #[test]
    fn new_store_is_loading_and_empty() {
        let state = SessionStore::new().snapshot();
        assert!(state.loading);
        assert_eq!(state.identity, None);
        assert_eq!(state.profile, None);
    }

    #[tokio::test]
    async fn bootstrap_loads_identity_and_profile() {
        let backend = FakeBackend {
            session: Some(identity(1)),
            profile: Some(profile(1, Role::Trainer)),
            ..Default::default()
        };
        let sink = store();

        bootstrap(&backend, &sink).await;

        let state = sink.borrow().snapshot();
        assert!(!state.loading);
        assert_eq!(state.identity, Some(identity(1)));
        assert_eq!(state.profile.map(|p| p.role), Some(Role::Trainer));
    }

    #[tokio::test]
    async fn bootstrap_without_session_stops_loading() {
        let sink = store();
        bootstrap(&FakeBackend::default(), &sink).await;
        assert_eq!(sink.borrow().snapshot(), SessionState::default());
    }

    #[tokio::test]
    async fn bootstrap_swallows_session_errors() {
        let backend = FakeBackend {
            session_fails: true,
            ..Default::default()
        };
        let sink = store();
        bootstrap(&backend, &sink).await;

        let state = sink.borrow().snapshot();
        assert!(!state.loading);
        assert_eq!(state.identity, None);
    }

    #[tokio::test]
    async fn failed_profile_fetch_keeps_identity() {
        let backend = FakeBackend {
            session: Some(identity(1)),
            profile_fails: true,
            ..Default::default()
        };
        let sink = store();
        bootstrap(&backend, &sink).await;

        let state = sink.borrow().snapshot();
        assert!(!state.loading);
        assert_eq!(state.identity, Some(identity(1)));
        assert_eq!(state.profile, None);
    }

    #[tokio::test]
    async fn profile_of_another_user_is_rejected() {
        let backend = FakeBackend {
            session: Some(identity(1)),
            profile: Some(profile(2, Role::Client)),
            ..Default::default()
        };
        let sink = store();
        bootstrap(&backend, &sink).await;
        assert_eq!(sink.borrow().snapshot().profile, None);
    }

    #[tokio::test]
    async fn sign_in_event_loads_the_new_profile() {
        let sink = store();
        bootstrap(&FakeBackend::default(), &sink).await;

        let backend = FakeBackend {
            profile: Some(profile(3, Role::Client)),
            ..Default::default()
        };
        on_auth_event(&backend, &sink, AuthEvent::SignedIn, Some(identity(3))).await;

        let state = sink.borrow().snapshot();
        assert!(!state.loading);
        assert_eq!(state.profile.map(|p| p.id), Some(Uuid::from_u128(3)));
    }

    #[tokio::test]
    async fn sign_out_event_clears_immediately() {
        let backend = FakeBackend {
            session: Some(identity(1)),
            profile: Some(profile(1, Role::Client)),
            ..Default::default()
        };
        let sink = store();
        bootstrap(&backend, &sink).await;

        on_auth_event(&backend, &sink, AuthEvent::SignedOut, None).await;
        assert_eq!(sink.borrow().snapshot(), SessionState::default());
    }

    #[tokio::test]
    async fn token_refresh_keeps_profile_visible() {
        let backend = FakeBackend {
            session: Some(identity(1)),
            profile: Some(profile(1, Role::Trainer)),
            ..Default::default()
        };
        let sink = store();
        bootstrap(&backend, &sink).await;

        let (tx, rx) = oneshot::channel();
        *backend.gate.borrow_mut() = Some(rx);
        let mut refresh = pin!(on_auth_event(
            &backend,
            &sink,
            AuthEvent::TokenRefreshed,
            Some(identity(1))
        ));
        assert!(futures::poll!(refresh.as_mut()).is_pending());

        let state = sink.borrow().snapshot();
        assert!(!state.loading);
        assert!(state.profile.is_some());

        let _ = tx.send(Some(profile(1, Role::Trainer)));
        refresh.await;
        assert!(sink.borrow().snapshot().profile.is_some());
    }

    #[tokio::test]
    async fn sign_out_clears_even_when_remote_call_fails() {
        let backend = FakeBackend {
            session: Some(identity(1)),
            profile: Some(profile(1, Role::Client)),
            sign_out_fails: true,
            ..Default::default()
        };
        let sink = store();
        bootstrap(&backend, &sink).await;

        sign_out(&backend, &sink).await;

        assert_eq!(*backend.sign_out_calls.borrow(), 1);
        let state = sink.borrow().snapshot();
        assert_eq!(state.identity, None);
        assert_eq!(state.profile, None);
    }

    #[tokio::test]
    async fn profile_arriving_after_sign_out_is_discarded() {
        let sink = store();
        bootstrap(&FakeBackend::default(), &sink).await;

        let (tx, rx) = oneshot::channel();
        let backend = FakeBackend {
            gate: RefCell::new(Some(rx)),
            ..Default::default()
        };

        let mut sign_in = pin!(on_auth_event(
            &backend,
            &sink,
            AuthEvent::SignedIn,
            Some(identity(1))
        ));
        assert!(futures::poll!(sign_in.as_mut()).is_pending());
        assert!(sink.borrow().snapshot().loading);

        sign_out(&backend, &sink).await;
        let _ = tx.send(Some(profile(1, Role::Trainer)));
        sign_in.await;

        let state = sink.borrow().snapshot();
        assert_eq!(state.identity, None);
        assert_eq!(state.profile, None);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn profile_of_previous_account_is_discarded() {
        let sink = store();
        bootstrap(&FakeBackend::default(), &sink).await;

        let (tx, rx) = oneshot::channel();
        let slow = FakeBackend {
            gate: RefCell::new(Some(rx)),
            ..Default::default()
        };
        let mut first = pin!(on_auth_event(
            &slow,
            &sink,
            AuthEvent::SignedIn,
            Some(identity(1))
        ));
        assert!(futures::poll!(first.as_mut()).is_pending());

        let fast = FakeBackend {
            profile: Some(profile(2, Role::Client)),
            ..Default::default()
        };
        on_auth_event(&fast, &sink, AuthEvent::SignedIn, Some(identity(2))).await;

        let _ = tx.send(Some(profile(1, Role::Trainer)));
        first.await;

        let state = sink.borrow().snapshot();
        assert_eq!(state.identity, Some(identity(2)));
        assert_eq!(state.profile.map(|p| p.role), Some(Role::Client));
    }

    #[test]
    fn stale_tickets_do_not_apply() {
        let mut store = SessionStore::new();
        store.finish_loading();
        let ticket = store.set_identity(Some(identity(1))).unwrap();
        store.clear();
        assert!(!store.apply_profile(ticket, Some(profile(1, Role::Client))));
        assert_eq!(store.snapshot().profile, None);
    }

    #[tokio::test]
    async fn recheck_reports_refresh_new_account_and_expiry() {
        let backend = FakeBackend {
            session: Some(identity(1)),
            profile: Some(profile(1, Role::Client)),
            ..Default::default()
        };
        let sink = store();
        bootstrap(&backend, &sink).await;

        assert_eq!(
            recheck(&backend, &sink).await,
            Some((AuthEvent::TokenRefreshed, Some(identity(1))))
        );

        let switched = FakeBackend {
            session: Some(identity(2)),
            ..Default::default()
        };
        assert_eq!(
            recheck(&switched, &sink).await,
            Some((AuthEvent::SignedIn, Some(identity(2))))
        );

        assert_eq!(
            recheck(&FakeBackend::default(), &sink).await,
            Some((AuthEvent::SignedOut, None))
        );

        let failing = FakeBackend {
            session_fails: true,
            ..Default::default()
        };
        assert_eq!(recheck(&failing, &sink).await, None);
    }

    #[tokio::test]
    async fn recheck_is_quiet_while_loading_or_signed_out() {
        let backend = FakeBackend {
            session: Some(identity(1)),
            ..Default::default()
        };
        let sink = store();
        assert_eq!(recheck(&backend, &sink).await, None);

        bootstrap(&FakeBackend::default(), &sink).await;
        assert_eq!(recheck(&FakeBackend::default(), &sink).await, None);
    }

    #[tokio::test]
    async fn session_read_before_sign_out_does_not_restore_identity() {
        let backend = FakeBackend {
            session: Some(identity(1)),
            profile: Some(profile(1, Role::Trainer)),
            ..Default::default()
        };
        let sink = store();
        bootstrap(&backend, &sink).await;

        let (tx, rx) = oneshot::channel();
        *backend.session_gate.borrow_mut() = Some(rx);
        let mut check = pin!(recheck(&backend, &sink));
        assert!(futures::poll!(check.as_mut()).is_pending());

        sign_out(&backend, &sink).await;
        let _ = tx.send(Some(identity(1)));

        assert_eq!(check.await, None);
        let state = sink.borrow().snapshot();
        assert_eq!(state.identity, None);
        assert_eq!(state.profile, None);
    }

    #[tokio::test]
    async fn early_sign_in_mark_stays_loading_until_profile() {
        let sink = store();
        bootstrap(&FakeBackend::default(), &sink).await;

        // What the handle records before the event reaches the provider.
        sink.borrow_mut().set_identity(Some(identity(4)));
        assert!(sink.borrow().snapshot().loading);

        let backend = FakeBackend {
            profile: Some(profile(4, Role::Trainer)),
            ..Default::default()
        };
        on_auth_event(&backend, &sink, AuthEvent::SignedIn, Some(identity(4))).await;

        let state = sink.borrow().snapshot();
        assert!(!state.loading);
        assert_eq!(state.profile.map(|p| p.role), Some(Role::Trainer));
    }
}
