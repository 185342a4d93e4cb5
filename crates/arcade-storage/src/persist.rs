//! JSON helpers that never fail
//!
//! Backend errors are logged and dropped; unparsable values read as absent.

use crate::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and decode a JSON value, `None` when absent, unreadable or corrupt
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring corrupt value under {}: {}", key, e);
            None
        }
    }
}

/// Encode and write a JSON value; returns whether the write succeeded
pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!("Failed to encode {}: {}", key, e);
            return false;
        }
    };

    match store.set(key, &encoded) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to persist {}: {}", key, e);
            false
        }
    }
}

/// Delete a key; returns whether the delete succeeded
pub fn remove_key(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to remove {}: {}", key, e);
            false
        }
    }
}
