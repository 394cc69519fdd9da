//! Observer plumbing and application events
//!
//! State changes that affect several cached views are published as
//! [`AppEvent`]s. Readers (the query cache, UI providers) subscribe instead of
//! the publisher reaching into them.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Something happened that may make cached server data stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppEvent {
    /// A new token was stored
    LoggedIn,
    /// The session ended (explicitly, by account deletion, or by a rejected token)
    LoggedOut,
    /// The current user's own profile changed
    ProfileChanged,
    /// Users were created, edited or deleted
    UsersChanged,
    /// Items were created, edited or deleted
    ItemsChanged,
}

type Callback<T> = Rc<dyn Fn(&T)>;

struct ListenerSet<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Callback<T>)>>,
}

/// A list of callbacks notified synchronously, in subscription order
pub struct Listeners<T> {
    inner: Rc<ListenerSet<T>>,
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(ListenerSet {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it stays registered until the handle is dropped
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(callback)));

        let set: Weak<ListenerSet<T>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(set) = set.upgrade() {
                    set.listeners.borrow_mut().retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    /// Notify every listener.
    ///
    /// Listeners may subscribe, unsubscribe or emit again from inside the
    /// callback; they see a snapshot taken before the first call.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in snapshot {
            callback(value);
        }
    }

    /// Whether both handles notify the same callbacks
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn len(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unsubscribes on drop
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the callback registered for as long as the source lives
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Application-wide event channel
pub type EventBus = Listeners<AppEvent>;
