//! Search history and query popularity

use arcade_storage::{KeyValueStore, keys, load_json, save_json};
use std::sync::Arc;

/// Queries the user has run, plus how often each was run
///
/// History is kept oldest first and never holds the same query twice; a
/// repeated query keeps its original position. Both lists are written
/// through to the store on every change, and store failures only cost
/// persistence, never the in-memory state.
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<String>,
    /// (query, count) in first-recorded order
    popular: Vec<(String, u64)>,
    limit: usize,
}

impl SearchHistory {
    /// Load persisted history, treating anything unreadable as empty
    pub fn load(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        let mut entries: Vec<String> =
            load_json(store.as_ref(), keys::SEARCH_HISTORY).unwrap_or_default();
        let popular: Vec<(String, u64)> =
            load_json(store.as_ref(), keys::POPULAR_SEARCHES).unwrap_or_default();

        if entries.len() > limit {
            entries.drain(..entries.len() - limit);
        }

        Self {
            store,
            entries,
            popular,
            limit,
        }
    }

    /// Record a normalised query
    pub fn record(&mut self, query: &str) {
        if !self.entries.iter().any(|q| q == query) {
            self.entries.push(query.to_string());
            if self.entries.len() > self.limit {
                self.entries.drain(..self.entries.len() - self.limit);
            }
            save_json(self.store.as_ref(), keys::SEARCH_HISTORY, &self.entries);
        }

        match self.popular.iter_mut().find(|(q, _)| q == query) {
            Some((_, count)) => *count += 1,
            None => self.popular.push((query.to_string(), 1)),
        }
        save_json(self.store.as_ref(), keys::POPULAR_SEARCHES, &self.popular);
    }

    /// Most recent queries first
    pub fn recent(&self, limit: usize) -> Vec<String> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }

    /// Most frequent queries first, ties in first-recorded order
    pub fn popular(&self, limit: usize) -> Vec<(String, u64)> {
        let mut popular = self.popular.clone();
        popular.sort_by(|a, b| b.1.cmp(&a.1));
        popular.truncate(limit);
        popular
    }

    /// Recorded queries starting with `prefix`, in first-recorded order
    pub fn popular_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.popular
            .iter()
            .map(|(q, _)| q.as_str())
            .filter(move |q| q.starts_with(prefix))
    }

    /// Forget the history; popularity counts are kept
    pub fn clear(&mut self) {
        self.entries.clear();
        save_json(self.store.as_ref(), keys::SEARCH_HISTORY, &self.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_storage::MemoryStore;

    fn setup(limit: usize) -> (SearchHistory, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let history = SearchHistory::load(Arc::clone(&store) as Arc<dyn KeyValueStore>, limit);
        (history, store)
    }

    #[test]
    fn test_repeat_keeps_original_position() {
        let (mut history, _) = setup(50);
        history.record("a");
        history.record("b");
        history.record("a");

        assert_eq!(history.len(), 2);
        assert_eq!(history.recent(10), vec!["b", "a"]);
        assert_eq!(history.popular(10)[0], ("a".to_string(), 2));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let (mut history, _) = setup(3);
        for q in ["a", "b", "c", "d"] {
            history.record(q);
        }
        assert_eq!(history.recent(10), vec!["d", "c", "b"]);
        assert_eq!(history.recent(1), vec!["d"]);
    }

    #[test]
    fn test_persisted_and_reloaded() {
        let (mut history, store) = setup(50);
        history.record("geometry");
        history.record("spam");
        history.record("spam");

        let reloaded = SearchHistory::load(store as Arc<dyn KeyValueStore>, 50);
        assert_eq!(reloaded.recent(10), vec!["spam", "geometry"]);
        assert_eq!(
            reloaded.popular(10),
            vec![("spam".to_string(), 2), ("geometry".to_string(), 1)]
        );
    }

    #[test]
    fn test_popular_searches_wire_format() {
        let (mut history, store) = setup(50);
        history.record("dash");
        assert_eq!(
            store.get(keys::POPULAR_SEARCHES).unwrap(),
            Some(r#"[["dash",1]]"#.to_string())
        );
        assert_eq!(
            store.get(keys::SEARCH_HISTORY).unwrap(),
            Some(r#"["dash"]"#.to_string())
        );
    }

    #[test]
    fn test_clear_keeps_popularity() {
        let (mut history, store) = setup(50);
        history.record("dash");
        history.clear();

        assert!(history.is_empty());
        assert_eq!(store.get(keys::SEARCH_HISTORY).unwrap(), Some("[]".to_string()));
        assert_eq!(history.popular(5).len(), 1);
    }

    #[test]
    fn test_corrupt_persisted_data_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::SEARCH_HISTORY, "{{{").unwrap();
        store.set(keys::POPULAR_SEARCHES, r#"{"dash": 3}"#).unwrap();

        let history = SearchHistory::load(store as Arc<dyn KeyValueStore>, 50);
        assert!(history.is_empty());
        assert!(history.popular(5).is_empty());
    }

    #[test]
    fn test_offline_store_keeps_session_state() {
        let (mut history, store) = setup(50);
        store.set_available(false);

        history.record("dash");
        assert_eq!(history.recent(5), vec!["dash"]);
        assert_eq!(history.popular_with_prefix("da").collect::<Vec<_>>(), vec!["dash"]);
    }
}
