//! Preference storage trait and error types.
//!
//! This module defines the `PreferenceStore` trait that abstracts over
//! different storage implementations (SQLite, in-memory).

use std::collections::HashMap;

use parking_lot::Mutex;
use thiserror::Error;

/// Errors that can occur during preference storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database rejected the operation.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A value could not be encoded for storage.
    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Storage cannot be reached at all.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Result type for preference storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Flat string key/value persistence.
///
/// Implementations take `&self` and handle their own locking so a store can
/// be shared behind an `Arc` or a `Box<dyn PreferenceStore>`.
pub trait PreferenceStore: Send + Sync {
    /// Value for `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Insert or replace the value for `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Forget `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Process-lifetime store. Used when no database can be opened and in tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}
