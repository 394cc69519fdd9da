//! Key-value persistence with an in-memory fallback
//!
//! The browser's `localStorage` can be missing (no window, sandboxed iframe,
//! privacy mode) or reject writes (quota). [`FallbackStorage`] wraps any
//! [`KeyValueStorage`] and switches to process memory the first time the
//! backend fails, so callers never see a storage error.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Storage backend failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

/// A string key-value slot store, modelled on the Web Storage API
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.remove(key);
        Ok(())
    }
}

struct FallbackInner {
    primary: Option<Rc<dyn KeyValueStorage>>,
    memory: MemoryStorage,
    degraded: Cell<bool>,
}

/// Infallible storage: a durable backend with an in-memory fallback.
///
/// Once degraded, all reads and writes go to memory for the rest of the
/// session so the two never disagree.
#[derive(Clone)]
pub struct FallbackStorage {
    inner: Rc<FallbackInner>,
}

impl std::fmt::Debug for FallbackStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackStorage")
            .field("has_primary", &self.inner.primary.is_some())
            .field("degraded", &self.inner.degraded.get())
            .finish()
    }
}

impl FallbackStorage {
    /// Wrap a durable backend
    pub fn new(primary: Rc<dyn KeyValueStorage>) -> Self {
        Self::build(Some(primary))
    }

    /// Storage that only ever lives in memory
    pub fn memory_only() -> Self {
        Self::build(None)
    }

    fn build(primary: Option<Rc<dyn KeyValueStorage>>) -> Self {
        let degraded = primary.is_none();
        Self {
            inner: Rc::new(FallbackInner {
                primary,
                memory: MemoryStorage::new(),
                degraded: Cell::new(degraded),
            }),
        }
    }

    /// Whether the durable backend has been abandoned
    pub fn is_degraded(&self) -> bool {
        self.inner.degraded.get()
    }

    fn primary(&self) -> Option<&Rc<dyn KeyValueStorage>> {
        if self.inner.degraded.get() {
            None
        } else {
            self.inner.primary.as_ref()
        }
    }

    fn degrade(&self, error: &StorageError) {
        if !self.inner.degraded.replace(true) {
            tracing::warn!(%error, "Persistent storage failed, keeping state in memory");
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(primary) = self.primary() {
            match primary.get_item(key) {
                Ok(value) => return value,
                Err(error) => self.degrade(&error),
            }
        }
        self.inner.memory.get(key)
    }

    pub fn set(&self, key: &str, value: &str) {
        if let Some(primary) = self.primary() {
            match primary.set_item(key, value) {
                Ok(()) => return,
                Err(error) => self.degrade(&error),
            }
        }
        self.inner.memory.set(key, value);
    }

    pub fn remove(&self, key: &str) {
        if let Some(primary) = self.primary() {
            match primary.remove_item(key) {
                Ok(()) => return,
                Err(error) => self.degrade(&error),
            }
        }
        self.inner.memory.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FailingStorage;

    #[test]
    fn writes_reach_the_primary_backend() {
        let backend = MemoryStorage::new();
        let storage = FallbackStorage::new(Rc::new(backend.clone()));

        storage.set("colorMode", "dark-mode");
        assert_eq!(backend.get("colorMode").as_deref(), Some("dark-mode"));
        assert_eq!(storage.get("colorMode").as_deref(), Some("dark-mode"));

        storage.remove("colorMode");
        assert!(backend.is_empty());
        assert!(!storage.is_degraded());
    }

    #[test]
    fn failing_backend_degrades_to_memory() {
        let storage = FallbackStorage::new(Rc::new(FailingStorage));

        assert_eq!(storage.get("access_token"), None);
        assert!(storage.is_degraded());

        storage.set("access_token", "t");
        assert_eq!(storage.get("access_token").as_deref(), Some("t"));
        storage.remove("access_token");
        assert_eq!(storage.get("access_token"), None);
    }

    #[test]
    fn memory_only_starts_degraded() {
        let storage = FallbackStorage::memory_only();
        assert!(storage.is_degraded());
        storage.set("k", "v");
        assert_eq!(storage.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn clones_share_state() {
        let storage = FallbackStorage::memory_only();
        let other = storage.clone();
        storage.set("k", "v");
        assert_eq!(other.get("k").as_deref(), Some("v"));
    }
}
