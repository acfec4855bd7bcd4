//! Local key-value storage
//!
//! Every feature that persists state owns one disjoint key in a single
//! key-value store. Values are plain strings; structured records are JSON.
//!
//! ```text
//! ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────────┐
//! │ Progress │ │ Identity │ │  Games   │ │ Preferences │
//! └────┬─────┘ └────┬─────┘ └────┬─────┘ └──────┬──────┘
//!      └────────────┴─────┬──────┴──────────────┘
//!                         ▼
//!                  KeyValueStore
//!            (SQLite file or in-memory)
//! ```

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Fixed keys, one per persisted record
pub mod keys {
    pub const IDENTITY: &str = "cyberSecUser";
    pub const PROGRESS: &str = "userProgress";
    pub const GAME_STATS: &str = "gameStats";
    pub const THEME: &str = "theme";
    pub const LANGUAGE: &str = "language";
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to prepare storage location: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode record for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A synchronous string key-value store
///
/// Writes are best-effort from the caller's point of view: features log
/// failures and carry on, so implementations never retry.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Store handle shared by all features of one application context
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Read and decode a JSON record.
///
/// Returns `None` when the key is absent, unreadable or malformed. Anything
/// other than a plain absence is logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = load_raw(store, key)?;
    decode_json(key, &raw)
}

/// Read a raw value, treating read failures like absence
pub fn load_raw(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to read '{}' from storage: {}", key, e);
            None
        }
    }
}

/// Decode a JSON record, logging and discarding malformed input
pub fn decode_json<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed record '{}': {}", key, e);
            None
        }
    }
}

/// Encode and write a JSON record
pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Write a record, logging instead of failing
pub fn save_json_best_effort<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = save_json(store, key, value) {
        tracing::warn!("Failed to persist '{}': {}", key, e);
    }
}
