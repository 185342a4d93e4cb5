//! Relevance search for the arcade portal
//!
//! Scores every catalog game against a query using weighted substring and
//! fuzzy subsequence signals, caches ranked results for a few minutes,
//! generates autocomplete suggestions and keeps a persisted history of what
//! was searched.
//!
//! # Example
//!
//! ```no_run
//! use arcade_catalog::Catalog;
//! use arcade_config::SearchConfig;
//! use arcade_search::{SearchEngine, SearchOptions};
//! use arcade_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::seeded().unwrap());
//! let store = Arc::new(MemoryStore::new());
//! let mut engine = SearchEngine::new(catalog, store, &SearchConfig::default());
//!
//! let result = engine.search("dash", &SearchOptions::default());
//! for game in &result.games {
//!     println!("{}", game.name);
//! }
//! ```

mod cache;
mod engine;
mod fuzzy;
mod history;
mod scoring;

pub use cache::ResultCache;
pub use engine::{AdvancedFilters, SearchEngine};
pub use fuzzy::fuzzy_match;
pub use history::SearchHistory;
pub use scoring::{SearchOptions, score_game};

use arcade_catalog::{Game, GameCategory};

/// Ranked output of a search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// Best match first
    pub games: Vec<Game>,
    /// Relevance score of each entry in `games`
    pub scores: Vec<f64>,
    pub categories: Vec<GameCategory>,
    pub suggestions: Vec<String>,
    /// Matching games before the result cap was applied
    pub total_results: usize,
    /// Wall time spent ranking; zero when served from cache
    pub search_time_ms: f64,
}

impl SearchResult {
    /// Score of a game in this result, if it is present
    pub fn score_of(&self, game_id: &str) -> Option<f64> {
        self.games
            .iter()
            .position(|g| g.id == game_id)
            .map(|idx| self.scores[idx])
    }
}
