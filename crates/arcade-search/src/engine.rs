//! Search engine: ranking, caching, suggestions and analytics

use crate::{ResultCache, SearchHistory, SearchOptions, SearchResult, score_game};
use arcade_catalog::{Catalog, CategoryIndex, Game, GameCategory};
use arcade_config::SearchConfig;
use arcade_storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Hard constraints applied after ranking in [`SearchEngine::advanced_search`]
///
/// Unset fields place no constraint. Bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedFilters {
    /// Allowed category ids
    pub categories: Vec<String>,
    /// Game must carry at least one of these
    pub tags: Vec<String>,
    pub min_popularity: Option<u8>,
    pub max_popularity: Option<u8>,
    pub featured_only: bool,
    pub added_after: Option<DateTime<Utc>>,
    pub added_before: Option<DateTime<Utc>>,
}

/// Full-text game search over a shared catalog
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    categories: CategoryIndex,
    cache: ResultCache,
    suggestions: HashMap<(String, usize), Vec<String>>,
    history: SearchHistory,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn KeyValueStore>,
        config: &SearchConfig,
    ) -> Self {
        Self {
            categories: CategoryIndex::new(Arc::clone(&catalog)),
            catalog,
            cache: ResultCache::new(config.cache_ttl(), config.cache_capacity),
            suggestions: HashMap::new(),
            history: SearchHistory::load(store, config.history_limit),
            config: config.clone(),
        }
    }

    /// Options for a plain search under the current configuration
    pub fn default_options(&self) -> SearchOptions {
        SearchOptions {
            max_results: self.config.max_results,
            ..SearchOptions::default()
        }
    }

    /// Rank catalog games against `query`
    ///
    /// A blank query returns an empty result without touching the cache or
    /// the history.
    pub fn search(&mut self, query: &str, options: &SearchOptions) -> SearchResult {
        self.search_at(query, options, Instant::now())
    }

    fn search_at(&mut self, query: &str, options: &SearchOptions, now: Instant) -> SearchResult {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return SearchResult::default();
        }

        let key = format!("{}|{}", normalized, options.cache_key());
        if let Some(cached) = self.cache.get(&key, now) {
            let mut result = cached.clone();
            result.search_time_ms = 0.0;
            tracing::debug!("Search cache hit: {}", key);
            self.record_query(&normalized);
            return result;
        }

        let started = Instant::now();
        let catalog = Arc::clone(&self.catalog);

        let mut ranked: Vec<(&Game, f64)> = catalog
            .games()
            .iter()
            .map(|game| (game, score_game(game, &normalized, options)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let total_results = ranked.len();
        ranked.truncate(options.max_results);

        let limit = self.config.suggestion_limit;
        let mut result = SearchResult {
            games: ranked.iter().map(|(game, _)| (*game).clone()).collect(),
            scores: ranked.iter().map(|(_, score)| *score).collect(),
            categories: self.search_categories(&normalized),
            suggestions: self.generate_suggestions(&normalized, limit),
            total_results,
            search_time_ms: 0.0,
        };
        result.search_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        tracing::debug!(
            "Search '{}' matched {} games in {:.3}ms",
            normalized,
            total_results,
            result.search_time_ms
        );

        self.cache.insert(key, result.clone(), now);
        self.record_query(&normalized);
        result
    }

    /// Ranked search followed by hard filters
    ///
    /// Always searches with every signal enabled, then drops games failing
    /// any filter stage.
    pub fn advanced_search(&mut self, query: &str, filters: &AdvancedFilters) -> SearchResult {
        let options = SearchOptions {
            include_fuzzy: true,
            include_tags: true,
            include_metadata: true,
            max_results: self.config.advanced_max_results,
        };
        let result = self.search(query, &options);

        let mut ranked: Vec<(Game, f64)> = result.games.into_iter().zip(result.scores).collect();

        if !filters.categories.is_empty() {
            ranked.retain(|(g, _)| filters.categories.contains(&g.category.id));
        }
        if !filters.tags.is_empty() {
            ranked.retain(|(g, _)| filters.tags.iter().any(|t| g.has_tag(t)));
        }
        if let Some(min) = filters.min_popularity {
            ranked.retain(|(g, _)| g.popularity >= min);
        }
        if let Some(max) = filters.max_popularity {
            ranked.retain(|(g, _)| g.popularity <= max);
        }
        if filters.featured_only {
            ranked.retain(|(g, _)| g.featured);
        }
        if let Some(after) = filters.added_after {
            ranked.retain(|(g, _)| g.date_added >= after);
        }
        if let Some(before) = filters.added_before {
            ranked.retain(|(g, _)| g.date_added <= before);
        }

        let (games, scores): (Vec<Game>, Vec<f64>) = ranked.into_iter().unzip();
        SearchResult {
            total_results: games.len(),
            games,
            scores,
            ..result
        }
    }

    /// Categories whose name, description or slug contains `query`
    pub fn search_categories(&self, query: &str) -> Vec<GameCategory> {
        self.categories
            .search_categories(query)
            .into_iter()
            .map(|c| c.as_ref().clone())
            .collect()
    }

    /// Autocomplete candidates for a partial query
    ///
    /// Name words, full names, tags, category names and previously searched
    /// queries that start with the query, in that order, without duplicates.
    pub fn generate_suggestions(&mut self, query: &str, limit: usize) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let key = (query, limit);
        if let Some(memo) = self.suggestions.get(&key) {
            return memo.clone();
        }
        let query = key.0.as_str();

        let mut out = Vec::new();
        let games = self.catalog.games();

        for game in games {
            for word in game.name.split_whitespace() {
                let word = word.to_lowercase();
                if word.starts_with(query) {
                    push_unique(&mut out, word);
                }
            }
        }
        for game in games {
            if game.name.to_lowercase().starts_with(query) {
                push_unique(&mut out, game.name.clone());
            }
        }
        for tag in games.iter().flat_map(|g| g.tags.iter()) {
            if tag.to_lowercase().starts_with(query) {
                push_unique(&mut out, tag.clone());
            }
        }
        for category in self.catalog.categories() {
            if category.name.to_lowercase().starts_with(query) {
                push_unique(&mut out, category.name.clone());
            }
        }
        for recorded in self.history.popular_with_prefix(query) {
            push_unique(&mut out, recorded.to_string());
        }

        out.truncate(limit);
        self.suggestions.insert(key, out.clone());
        out
    }

    /// Most recent queries first
    pub fn get_search_history(&self, limit: usize) -> Vec<String> {
        self.history.recent(limit)
    }

    /// Most frequent queries with their counts
    pub fn get_popular_searches(&self, limit: usize) -> Vec<(String, u64)> {
        self.history.popular(limit)
    }

    /// Forget search history; popularity counts are kept
    pub fn clear_search_history(&mut self) {
        self.history.clear();
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Cached result count, expired entries included until touched
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn record_query(&mut self, normalized: &str) {
        self.history.record(normalized);
        // popular searches feed suggestions
        self.suggestions.clear();
    }
}

fn push_unique(out: &mut Vec<String>, candidate: String) {
    if !out.contains(&candidate) {
        out.push(candidate);
    }
}
