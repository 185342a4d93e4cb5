//! Category aggregates derived from the game collection

use crate::{Catalog, GameCategory};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A category together with the number of games filed under it
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithCount {
    pub category: Arc<GameCategory>,
    pub game_count: usize,
}

/// Aggregate statistics for a single category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub total_games: usize,
    pub featured_games: usize,
    /// Mean popularity, rounded to the nearest integer
    pub average_popularity: u32,
    /// Up to five most frequent tags
    pub top_tags: Vec<String>,
}

const TOP_TAG_LIMIT: usize = 5;

/// Category index over a shared catalog
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    catalog: Arc<Catalog>,
}

impl CategoryIndex {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Every category with its game count, in catalog order
    pub fn get_categories_with_counts(&self) -> Vec<CategoryWithCount> {
        self.catalog
            .categories()
            .iter()
            .map(|category| CategoryWithCount {
                category: Arc::clone(category),
                game_count: self
                    .catalog
                    .games()
                    .iter()
                    .filter(|g| g.category.id == category.id)
                    .count(),
            })
            .collect()
    }

    /// Categories ordered by game count, largest first
    pub fn get_categories_by_popularity(&self) -> Vec<CategoryWithCount> {
        let mut categories = self.get_categories_with_counts();
        categories.sort_by(|a, b| b.game_count.cmp(&a.game_count));
        categories
    }

    pub fn get_popular_categories(&self, limit: usize) -> Vec<CategoryWithCount> {
        let mut categories = self.get_categories_by_popularity();
        categories.truncate(limit);
        categories
    }

    /// Statistics for a category, or `None` when it is unknown or empty
    pub fn get_category_stats(&self, category_id: &str) -> Option<CategoryStats> {
        let games = self.catalog.get_games_by_category(category_id);
        if games.is_empty() {
            return None;
        }

        let total_games = games.len();
        let featured_games = games.iter().filter(|g| g.featured).count();
        let popularity_sum: u32 = games.iter().map(|g| u32::from(g.popularity)).sum();
        let average_popularity = (f64::from(popularity_sum) / total_games as f64).round() as u32;

        // (tag, count) in first-encountered order
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for game in &games {
            for tag in &game.tags {
                match counts.iter_mut().find(|(t, _)| *t == tag.as_str()) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((tag.as_str(), 1)),
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Some(CategoryStats {
            total_games,
            featured_games,
            average_popularity,
            top_tags: counts
                .into_iter()
                .take(TOP_TAG_LIMIT)
                .map(|(tag, _)| tag.to_string())
                .collect(),
        })
    }

    /// Categories sharing the most tags with `category_id`
    ///
    /// Categories with no tag in common are left out.
    pub fn get_related_categories(&self, category_id: &str, limit: usize) -> Vec<Arc<GameCategory>> {
        let tag_sets = self.tag_sets();
        let Some(source_tags) = tag_sets.get(category_id) else {
            return Vec::new();
        };

        let mut scored: Vec<(Arc<GameCategory>, usize)> = self
            .catalog
            .categories()
            .iter()
            .filter(|c| c.id != category_id)
            .filter_map(|c| {
                let shared = tag_sets
                    .get(c.id.as_str())
                    .map(|tags| tags.intersection(source_tags).count())
                    .unwrap_or(0);
                (shared > 0).then(|| (Arc::clone(c), shared))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().take(limit).map(|(c, _)| c).collect()
    }

    /// Case-insensitive substring search over name, description and slug
    pub fn search_categories(&self, query: &str) -> Vec<Arc<GameCategory>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.catalog
            .categories()
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&query)
                    || c.description.to_lowercase().contains(&query)
                    || c.slug.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Union of tags per category id
    fn tag_sets(&self) -> HashMap<&str, HashSet<&str>> {
        let mut sets: HashMap<&str, HashSet<&str>> = HashMap::new();
        for game in self.catalog.games() {
            sets.entry(game.category.id.as_str())
                .or_default()
                .extend(game.tags.iter().map(String::as_str));
        }
        sets
    }
}
