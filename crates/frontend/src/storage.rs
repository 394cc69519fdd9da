//! `window.localStorage` as a session storage backend

use fastadmin_session::{FallbackStorage, KeyValueStorage, StorageError};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// The browser's local storage, looked up on every access so a page that
/// loses access mid-session fails over cleanly.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|err| StorageError::Unavailable(js_error(&err)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(js_error(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::WriteRejected(js_error(&err)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| StorageError::WriteRejected(js_error(&err)))
    }
}

/// Local storage with the in-memory fallback in front of it
pub fn browser_storage() -> FallbackStorage {
    FallbackStorage::new(Rc::new(LocalStorage))
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn values_round_trip_through_local_storage() {
        let storage = browser_storage();
        storage.set("fastadmin-test", "value");
        assert_eq!(storage.get("fastadmin-test").as_deref(), Some("value"));
        storage.remove("fastadmin-test");
        assert_eq!(storage.get("fastadmin-test"), None);
        assert!(!storage.is_degraded());
    }
}
