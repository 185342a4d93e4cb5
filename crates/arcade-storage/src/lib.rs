//! Persistence for the arcade portal
//!
//! Everything the portal remembers between sessions goes through the
//! [`KeyValueStore`] trait: string keys mapped to JSON-encoded string values,
//! the same shape as browser local storage.
//!
//! # Backends
//!
//! - [`MemoryStore`]: process-local map, used in tests and for throwaway sessions
//! - [`SqliteStore`]: single-table SQLite database that survives restarts
//!
//! Callers never see persistence failures. The helpers in this crate log and
//! swallow backend errors and treat corrupt values as absent.

mod memory;
mod persist;
mod sqlite;
mod user_state;

pub use memory::MemoryStore;
pub use persist::{load_json, remove_key, save_json};
pub use sqlite::SqliteStore;
pub use user_state::{DEFAULT_RECENTLY_PLAYED_LIMIT, UserState};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keys used by the portal
pub mod keys {
    /// JSON array of game ids, most recent first
    pub const RECENTLY_PLAYED: &str = "recentlyPlayed";
    /// JSON array of game ids
    pub const FAVORITES: &str = "favorites";
    /// JSON array of queries, oldest first
    pub const SEARCH_HISTORY: &str = "searchHistory";
    /// JSON array of `[query, count]` pairs
    pub const POPULAR_SEARCHES: &str = "popularSearches";
}

/// String key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key; deleting an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
