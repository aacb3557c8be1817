//! Auth-state change notifications.
//!
//! Sign-in and sign-out happen in leaf views (login, register, navbar) while the session state
//! lives in the provider. Views [`AuthEventBus::emit`] what happened; the provider holds the one
//! long-lived [`Subscription`] and updates the session in response.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use api::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

type Listener = Rc<dyn Fn(AuthEvent, Option<Identity>)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Single-threaded publish/subscribe hub for [`AuthEvent`]s.
#[derive(Clone, Default)]
pub struct AuthEventBus {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for AuthEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthEventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl AuthEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned [`Subscription`] is released.
    pub fn subscribe(
        &self,
        listener: impl Fn(AuthEvent, Option<Identity>) + 'static,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
            active: true,
        }
    }

    /// Deliver `event` to every listener registered at the time of the call.
    pub fn emit(&self, event: AuthEvent, session: Option<Identity>) {
        // Listeners may subscribe or unsubscribe while being called.
        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(event, session.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Handle of a registered listener. Released exactly once, on [`Subscription::unsubscribe`] or
/// on drop, whichever comes first.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
    active: bool,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use api::Uuid;

    use super::*;

    fn identity() -> Identity {
        Identity {
            id: Uuid::from_u128(7),
            email: "coach@example.com".to_string(),
        }
    }

    #[test]
    fn listeners_receive_events_until_unsubscribed() {
        let bus = AuthEventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let subscription = bus.subscribe(move |event, session| {
            sink.borrow_mut().push((event, session.is_some()));
        });

        bus.emit(AuthEvent::SignedIn, Some(identity()));
        bus.emit(AuthEvent::SignedOut, None);
        subscription.unsubscribe();
        bus.emit(AuthEvent::TokenRefreshed, Some(identity()));

        assert_eq!(
            *seen.borrow(),
            vec![(AuthEvent::SignedIn, true), (AuthEvent::SignedOut, false)]
        );
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn dropping_a_subscription_unregisters_once() {
        let bus = AuthEventBus::new();
        let first = bus.subscribe(|_, _| {});
        let second = bus.subscribe(|_, _| {});
        assert_eq!(bus.listener_count(), 2);

        drop(first);
        assert_eq!(bus.listener_count(), 1);

        second.unsubscribe();
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn repeated_mounts_do_not_leak_listeners() {
        let bus = AuthEventBus::new();
        for _ in 0..5 {
            let subscription = bus.subscribe(|_, _| {});
            assert_eq!(bus.listener_count(), 1);
            subscription.unsubscribe();
        }
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_the_bus_is_harmless() {
        let subscription = {
            let bus = AuthEventBus::new();
            bus.subscribe(|_, _| {})
        };
        assert!(subscription.is_active());
        subscription.unsubscribe();
    }

    #[test]
    fn listener_may_unsubscribe_during_emit() {
        let bus = AuthEventBus::new();
        let calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let counter = Rc::clone(&calls);
        let own = Rc::clone(&slot);
        let subscription = bus.subscribe(move |_, _| {
            counter.set(counter.get() + 1);
            if let Some(sub) = own.borrow_mut().take() {
                sub.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(subscription);

        bus.emit(AuthEvent::SignedOut, None);
        bus.emit(AuthEvent::SignedOut, None);
        assert_eq!(calls.get(), 1);
        assert_eq!(bus.listener_count(), 0);
    }
}
