//! Fakes for exercising the coordinator without a browser

use crate::navigation::{Navigator, Route};
use crate::notify::{Notifier, Severity, Toast};
use crate::storage::{KeyValueStorage, StorageError};
use std::cell::RefCell;
use std::rc::Rc;

pub use crate::clock::ManualClock;

/// A backend that rejects every operation, like `localStorage` in a
/// sandboxed iframe
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStorage;

impl KeyValueStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteRejected("storage disabled".to_string()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

/// Records every navigation. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Rc<RefCell<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited.borrow().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.visited.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: Route) {
        self.visited.borrow_mut().push(route);
    }
}

/// Records every toast. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    toasts: Rc<RefCell<Vec<Toast>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.borrow().last().cloned()
    }

    pub fn errors(&self) -> Vec<String> {
        self.toasts
            .borrow()
            .iter()
            .filter(|toast| toast.severity == Severity::Error)
            .map(|toast| toast.description.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}
