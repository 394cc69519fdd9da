//! Bearer token persistence

use crate::storage::FallbackStorage;

/// Storage key of the bearer token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// The single durable slot holding the bearer token.
///
/// Absence means logged out. Tokens are replaced, never edited.
#[derive(Clone, Debug)]
pub struct TokenStore {
    storage: FallbackStorage,
}

impl TokenStore {
    pub const fn new(storage: FallbackStorage) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> Option<String> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    pub fn set(&self, token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, token);
    }

    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }
}
