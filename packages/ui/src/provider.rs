//! Session context for the whole view tree.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use api::Identity;
use dioxus::prelude::*;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::auth_events::{AuthEvent, AuthEventBus, Subscription};
use crate::session::{self, ServerBackend, SessionState, SessionStore};

/// Client-side session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds between session re-checks. 0 disables the poll.
    pub refresh_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 30,
        }
    }
}

/// Scoped accessor to the session, obtained with [`use_session`].
#[derive(Clone, Copy)]
pub struct SessionHandle {
    store: Signal<SessionStore>,
    bus: Signal<AuthEventBus>,
}

impl SessionHandle {
    /// Current snapshot. Reading it subscribes the calling component to changes.
    pub fn state(&self) -> SessionState {
        self.store.read().snapshot()
    }

    /// Current snapshot without subscribing, for event handlers and async loaders.
    pub fn peek_state(&self) -> SessionState {
        self.store.peek().snapshot()
    }

    /// Tell the provider the session changed, e.g. after a successful sign-in.
    ///
    /// A sign-in is recorded right away so a guard rendered before the provider handles the
    /// event already sees the pending identity instead of a signed-out session.
    pub fn announce(&self, event: AuthEvent, identity: Option<Identity>) {
        if let (AuthEvent::SignedIn, Some(identity)) = (event, identity.as_ref()) {
            let mut store = self.store;
            store.write().set_identity(Some(identity.clone()));
        }
        let bus = self.bus.peek().clone();
        bus.emit(event, identity);
    }

    /// Sign out remotely and clear the local session regardless of the outcome.
    pub async fn sign_out(&self) {
        session::sign_out(&ServerBackend, &self.store).await;
        self.announce(AuthEvent::SignedOut, None);
    }
}

pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Owns the session state. Wrap the router with it.
#[component]
pub fn SessionProvider(#[props(default)] config: SessionConfig, children: Element) -> Element {
    let store = use_signal(SessionStore::new);
    let bus = use_signal(AuthEventBus::new);
    use_context_provider(|| SessionHandle { store, bus });

    // Events are handled one at a time in the provider's scope, so a handler outlives the
    // view that emitted the event.
    let events = use_coroutine(
        move |mut rx: UnboundedReceiver<(AuthEvent, Option<Identity>)>| async move {
            while let Some((event, identity)) = rx.next().await {
                session::on_auth_event(&ServerBackend, &store, event, identity).await;
            }
        },
    );

    let subscription: Rc<RefCell<Option<Subscription>>> = use_hook(move || {
        let subscription = bus
            .peek()
            .subscribe(move |event, identity| events.send((event, identity)));
        Rc::new(RefCell::new(Some(subscription)))
    });
    use_drop(move || {
        if let Some(subscription) = subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    });

    use_hook(move || {
        spawn(async move {
            session::bootstrap(&ServerBackend, &store).await;
        });
    });

    // Periodic session re-check: picks up refreshed or expired server sessions.
    use_hook(move || {
        if config.refresh_interval_secs == 0 {
            return;
        }
        spawn(async move {
            let interval = Duration::from_secs(config.refresh_interval_secs);
            loop {
                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(interval).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(interval).await;

                if let Some((event, identity)) = session::recheck(&ServerBackend, &store).await {
                    let bus = bus.peek().clone();
                    bus.emit(event, identity);
                }
            }
        });
    });

    rsx! {
        {children}
    }
}
