//! Durable persistence of the session token.
//!
//! The token is kept as a raw string under a single `localStorage` key so it
//! survives reloads. Reads and writes are synchronous.

use crate::config::TOKEN_STORAGE_KEY;
use gloo_storage::{LocalStorage, Storage};
use thiserror::Error;

/// Failure to persist the session token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("failed to persist session token: {0}")]
    Write(String),
}

/// Storage backend for the bearer token.
pub trait TokenStorage {
    /// Reads the persisted token. Empty values count as absent.
    fn load_token(&self) -> Option<String>;

    /// Persists `token`, replacing any previous value.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the backend refuses the write.
    fn store_token(&self, token: &str) -> Result<(), StorageError>;

    /// Removes the persisted token, if any.
    fn clear_token(&self);
}

/// Token storage backed by the browser's `localStorage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTokenStorage {
    key: String,
}

impl Default for LocalTokenStorage {
    fn default() -> Self {
        Self::new(TOKEN_STORAGE_KEY)
    }
}

impl LocalTokenStorage {
    /// Storage under `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStorage for LocalTokenStorage {
    fn load_token(&self) -> Option<String> {
        // raw access: the value is stored unquoted, not as JSON
        LocalStorage::raw()
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn store_token(&self, token: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(&self.key, token)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }

    fn clear_token(&self) {
        LocalStorage::delete(&self.key);
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryTokenStorage;
