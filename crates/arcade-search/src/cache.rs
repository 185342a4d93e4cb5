//! Time-bounded cache of search results

use crate::SearchResult;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

struct CacheEntry {
    result: SearchResult,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) >= ttl
    }
}

/// Search result cache with a fixed TTL and an entry cap
///
/// Expired entries are dropped when looked up. Once the cap is reached the
/// least recently used entry makes room for a new one.
pub struct ResultCache {
    entries: LruCache<String, CacheEntry>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    /// Fetch a live entry, evicting it if it has expired
    pub fn get(&mut self, key: &str, now: Instant) -> Option<&SearchResult> {
        let ttl = self.ttl;
        let expired = self.entries.peek(key).map(|entry| entry.is_expired(ttl, now))?;

        if expired {
            self.entries.pop(key);
            tracing::debug!("Search cache entry expired: {}", key);
            return None;
        }

        self.entries.get(key).map(|entry| &entry.result)
    }

    pub fn insert(&mut self, key: String, result: SearchResult, now: Instant) {
        let entry = CacheEntry {
            result,
            stored_at: now,
        };

        if let Some((evicted, _)) = self.entries.push(key.clone(), entry) {
            if evicted != key {
                tracing::debug!("Search cache full, evicted {}", evicted);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
