//! Configuration sections

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where the game catalog comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Search engine tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Lifetime of a cached search result
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum cached results before the least recently used is evicted
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Result cap for plain searches
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Result cap for advanced searches, before filtering
    #[serde(default = "default_advanced_max_results")]
    pub advanced_max_results: usize,

    /// Suggestions returned per query
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Search history entries kept
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_capacity() -> usize {
    256
}

fn default_max_results() -> usize {
    50
}

fn default_advanced_max_results() -> usize {
    100
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_history_limit() -> usize {
    50
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
            max_results: default_max_results(),
            advanced_max_results: default_advanced_max_results(),
            suggestion_limit: default_suggestion_limit(),
            history_limit: default_history_limit(),
        }
    }
}

impl SearchConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Per-user state settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Length of the recently played list
    #[serde(default = "default_recently_played_limit")]
    pub recently_played_limit: usize,
}

fn default_recently_played_limit() -> usize {
    10
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            recently_played_limit: default_recently_played_limit(),
        }
    }
}

/// Persistence backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Nothing survives the process
    Memory,
    /// SQLite database file
    #[default]
    Sqlite,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file for the sqlite backend
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(crate::USER_CONFIG_DIR).join("state.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
        }
    }
}
