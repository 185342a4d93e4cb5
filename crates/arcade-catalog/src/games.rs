//! Game index: filtering, sorting and related-game scoring

use crate::{Catalog, Game, GameFilter, SortBy, SortOrder};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Aggregate counts over the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_games: usize,
    pub unique_categories: usize,
    pub featured_games: usize,
    /// Mean popularity, rounded to the nearest integer
    pub average_popularity: u32,
}

/// Personalisation hints for [`GameIndex::get_advanced_recommendations`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPreferences {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Related-game weights
const SAME_CATEGORY: u32 = 10;
const SHARED_TAG: u32 = 2;
const FEATURED: u32 = 1;

/// Recommendation weights
const REC_SAME_CATEGORY: f64 = 15.0;
const REC_SHARED_TAG: f64 = 3.0;
const REC_PREFERRED_CATEGORY: f64 = 8.0;
const REC_PREFERRED_TAG: f64 = 2.0;
const REC_POPULARITY: f64 = 0.1;
const REC_FEATURED: f64 = 2.0;

/// Filter and recommendation engine over a shared catalog
#[derive(Debug, Clone)]
pub struct GameIndex {
    catalog: Arc<Catalog>,
}

impl GameIndex {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Apply a filter
    ///
    /// Stages run in a fixed order (category, tags, search text, sort) and
    /// each only removes games from the previous stage's output.
    pub fn filter_games(&self, filter: &GameFilter) -> Vec<&Game> {
        let mut games: Vec<&Game> = self.catalog.games().iter().collect();

        if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
            games.retain(|g| g.category.id == category);
        }

        if !filter.tags.is_empty() {
            games.retain(|g| filter.tags.iter().any(|t| g.has_tag(t)));
        }

        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let term = search.to_lowercase();
            games.retain(|g| matches_text(g, &term));
        }

        if let Some(sort_by) = filter.sort_by {
            games.sort_by(|a, b| {
                let ordering = compare_by(a, b, sort_by);
                match filter.sort_order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        games
    }

    /// Games most similar to `game_id`, excluding the game itself
    pub fn get_related_games(&self, game_id: &str, limit: usize) -> Vec<&Game> {
        let Some(source) = self.catalog.get_game_by_id(game_id) else {
            return Vec::new();
        };

        let mut scored: Vec<(&Game, u32)> = self
            .catalog
            .games()
            .iter()
            .filter(|g| g.id != source.id)
            .map(|candidate| {
                let mut score = 0;
                if candidate.category.id == source.category.id {
                    score += SAME_CATEGORY;
                }
                score += SHARED_TAG * shared_tags(source, candidate) as u32;
                if candidate.featured {
                    score += FEATURED;
                }
                (candidate, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().take(limit).map(|(g, _)| g).collect()
    }

    pub fn get_game_stats(&self) -> CatalogStats {
        let games = self.catalog.games();
        if games.is_empty() {
            return CatalogStats::default();
        }

        let categories: HashSet<&str> = games.iter().map(|g| g.category.id.as_str()).collect();
        let popularity_sum: u32 = games.iter().map(|g| u32::from(g.popularity)).sum();

        CatalogStats {
            total_games: games.len(),
            unique_categories: categories.len(),
            featured_games: games.iter().filter(|g| g.featured).count(),
            average_popularity: (f64::from(popularity_sum) / games.len() as f64).round() as u32,
        }
    }

    /// Weighted recommendations around `game_id`, optionally personalised
    pub fn get_advanced_recommendations(
        &self,
        game_id: &str,
        preferences: Option<&UserPreferences>,
        limit: usize,
    ) -> Vec<&Game> {
        let Some(source) = self.catalog.get_game_by_id(game_id) else {
            return Vec::new();
        };

        let mut scored: Vec<(&Game, f64)> = self
            .catalog
            .games()
            .iter()
            .filter(|g| g.id != source.id)
            .map(|candidate| {
                let mut score = 0.0;
                if candidate.category.id == source.category.id {
                    score += REC_SAME_CATEGORY;
                }
                score += REC_SHARED_TAG * shared_tags(source, candidate) as f64;

                if let Some(prefs) = preferences {
                    if prefs.categories.contains(&candidate.category.id) {
                        score += REC_PREFERRED_CATEGORY;
                    }
                    let preferred = prefs.tags.iter().filter(|t| candidate.has_tag(t)).count();
                    score += REC_PREFERRED_TAG * preferred as f64;
                }

                score += f64::from(candidate.popularity) * REC_POPULARITY;
                if candidate.featured {
                    score += REC_FEATURED;
                }
                (candidate, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.into_iter().take(limit).map(|(g, _)| g).collect()
    }

    /// Distinct tags in first-seen order
    pub fn get_all_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.catalog
            .games()
            .iter()
            .flat_map(|g| g.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn get_games_by_tag(&self, tag: &str) -> Vec<&Game> {
        self.catalog.games().iter().filter(|g| g.has_tag(tag)).collect()
    }
}

/// Lowercase substring match against name, description, tags and developer
fn matches_text(game: &Game, term: &str) -> bool {
    game.name.to_lowercase().contains(term)
        || game.description.to_lowercase().contains(term)
        || game.tags.iter().any(|t| t.to_lowercase().contains(term))
        || game
            .developer()
            .is_some_and(|d| d.to_lowercase().contains(term))
}

fn compare_by(a: &Game, b: &Game, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Popularity => a.popularity.cmp(&b.popularity),
        SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortBy::DateAdded => a.date_added.cmp(&b.date_added),
    }
}

fn shared_tags(a: &Game, b: &Game) -> usize {
    a.tags.iter().filter(|t| b.has_tag(t)).count()
}
