//! Observable mirror of the token store
//!
//! Raw storage reads cannot be observed, so dependent queries would never
//! notice a login. The gate mirrors the token and notifies subscribers when
//! presence flips; it is what enables the current-user query.

use crate::events::{Listeners, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

struct GateInner {
    token: RefCell<Option<String>>,
    listeners: Listeners<bool>,
}

/// Session presence flag with change notifications
#[derive(Clone)]
pub struct SessionGate {
    inner: Rc<GateInner>,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl SessionGate {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            inner: Rc::new(GateInner {
                token: RefCell::new(initial),
                listeners: Listeners::new(),
            }),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.token.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.token.borrow().clone()
    }

    /// Update the mirror. Subscribers are told only when presence changes;
    /// swapping one token for another is not a transition.
    pub fn set_token(&self, token: Option<String>) {
        let now = token.is_some();
        let was = self.inner.token.replace(token).is_some();
        if was != now {
            tracing::debug!(logged_in = now, "Session gate changed");
            self.inner.listeners.emit(&now);
        }
    }

    /// Observe presence transitions
    pub fn subscribe(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.inner.listeners.subscribe(move |logged_in| callback(*logged_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn notifies_only_on_presence_change() {
        let gate = SessionGate::new(None);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            gate.subscribe(move |logged_in| seen.borrow_mut().push(logged_in))
        };

        gate.set_token(Some("a".into()));
        gate.set_token(Some("b".into()));
        gate.set_token(None);
        gate.set_token(None);

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert_eq!(gate.token(), None);
    }

    #[test]
    fn starts_from_the_initial_token() {
        let gate = SessionGate::new(Some("persisted".into()));
        assert!(gate.is_logged_in());
        assert_eq!(gate.token().as_deref(), Some("persisted"));
    }
}
