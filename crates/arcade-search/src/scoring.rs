//! Relevance scoring for a single game

use crate::fuzzy::fuzzy_match;
use arcade_catalog::Game;
use serde::{Deserialize, Serialize};

/// Which signals a search may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    pub include_fuzzy: bool,
    pub include_tags: bool,
    pub include_metadata: bool,
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            include_fuzzy: true,
            include_tags: true,
            include_metadata: true,
            max_results: 50,
        }
    }
}

impl SearchOptions {
    /// Cache key component for these options
    pub(crate) fn cache_key(&self) -> String {
        format!(
            "{}{}{}:{}",
            u8::from(self.include_fuzzy),
            u8::from(self.include_tags),
            u8::from(self.include_metadata),
            self.max_results
        )
    }
}

const NAME_EXACT: f64 = 100.0;
const NAME_CONTAINS: f64 = 50.0;
const NAME_PREFIX: f64 = 20.0;
const NAME_FUZZY: f64 = 25.0;
const DESCRIPTION_CONTAINS: f64 = 30.0;
const DESCRIPTION_FUZZY: f64 = 15.0;
const TAG_EXACT: f64 = 40.0;
const TAG_CONTAINS: f64 = 20.0;
const TAG_FUZZY: f64 = 10.0;
const DEVELOPER_CONTAINS: f64 = 15.0;
const CONTROLS_CONTAINS: f64 = 10.0;
const INSTRUCTIONS_CONTAINS: f64 = 10.0;
const CATEGORY_CONTAINS: f64 = 15.0;
const POPULARITY_WEIGHT: f64 = 0.1;
const FEATURED_BONUS: f64 = 5.0;

/// Score `game` against an already normalised (trimmed, lowercase) query
///
/// Each field contributes its strongest matching signal; fields add up.
/// Popularity and the featured bonus only lift games that matched on some
/// text, so a score of zero always means "no match".
pub fn score_game(game: &Game, query: &str, options: &SearchOptions) -> f64 {
    let mut score = 0.0;

    let name = game.name.to_lowercase();
    if name == query {
        score += NAME_EXACT;
    } else if name.contains(query) {
        score += NAME_CONTAINS;
        if name.starts_with(query) {
            score += NAME_PREFIX;
        }
    } else if options.include_fuzzy && fuzzy_match(&name, query) {
        score += NAME_FUZZY;
    }

    let description = game.description.to_lowercase();
    if description.contains(query) {
        score += DESCRIPTION_CONTAINS;
    } else if options.include_fuzzy && fuzzy_match(&description, query) {
        score += DESCRIPTION_FUZZY;
    }

    if options.include_tags {
        for tag in &game.tags {
            let tag = tag.to_lowercase();
            if tag == query {
                score += TAG_EXACT;
            } else if tag.contains(query) {
                score += TAG_CONTAINS;
            } else if options.include_fuzzy && fuzzy_match(&tag, query) {
                score += TAG_FUZZY;
            }
        }
    }

    if options.include_metadata {
        if let Some(meta) = &game.metadata {
            let fields = [
                (&meta.developer, DEVELOPER_CONTAINS),
                (&meta.controls, CONTROLS_CONTAINS),
                (&meta.instructions, INSTRUCTIONS_CONTAINS),
            ];
            for (field, weight) in fields {
                if field
                    .as_deref()
                    .is_some_and(|value| value.to_lowercase().contains(query))
                {
                    score += weight;
                }
            }
        }
    }

    if game.category.name.to_lowercase().contains(query) {
        score += CATEGORY_CONTAINS;
    }

    if score > 0.0 {
        score += f64::from(game.popularity) * POPULARITY_WEIGHT;
        if game.featured {
            score += FEATURED_BONUS;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_catalog::{Catalog, GameCategory, GameMetadata};
    use chrono::Utc;
    use std::sync::Arc;

    fn game(name: &str, tags: &[&str]) -> Game {
        Game {
            id: "g".to_string(),
            name: name.to_string(),
            description: String::new(),
            image: String::new(),
            url: String::new(),
            category: Arc::new(GameCategory {
                id: "misc".to_string(),
                name: "Misc".to_string(),
                slug: "misc".to_string(),
                description: String::new(),
                icon: "star".to_string(),
                color: "grey".to_string(),
            }),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured: false,
            popularity: 0,
            date_added: Utc::now(),
            metadata: None,
        }
    }

    fn score(game: &Game, query: &str) -> f64 {
        score_game(game, query, &SearchOptions::default())
    }

    #[test]
    fn test_name_signals() {
        assert_eq!(score(&game("Snake", &[]), "snake"), 100.0);
        assert_eq!(score(&game("Snake Classic", &[]), "snake"), 70.0);
        assert_eq!(score(&game("Classic Snake", &[]), "snake"), 50.0);
        // s-n-a-k-e in order across words
        assert_eq!(score(&game("Super Neon Attack Kit Extra", &[]), "snake"), 25.0);
        assert_eq!(score(&game("Tetris", &[]), "snake"), 0.0);
    }

    #[test]
    fn test_description_signals() {
        let mut g = game("Zzz", &[]);
        g.description = "Eat apples to grow".to_string();
        assert_eq!(score(&g, "apples"), 30.0);
        // "egw" is only a subsequence of the description
        assert_eq!(score(&g, "egw"), 15.0);
    }

    #[test]
    fn test_tag_signals_per_tag() {
        let g = game("Zzz", &["puzzle", "puzzles", "pzl-extra"]);
        // exact + contains + fuzzy
        assert_eq!(score(&g, "puzzle"), 40.0 + 20.0 + 0.0);
        assert_eq!(score(&g, "pzl"), 10.0 + 10.0 + 20.0);
    }

    #[test]
    fn test_metadata_and_category() {
        let mut g = game("Zzz", &[]);
        g.metadata = Some(GameMetadata {
            developer: Some("Arrow Works".to_string()),
            controls: Some("Arrow keys".to_string()),
            instructions: Some("Use the arrow keys".to_string()),
        });
        assert_eq!(score(&g, "arrow"), 35.0);
        assert_eq!(score(&g, "misc"), 15.0);
    }

    #[test]
    fn test_options_disable_signals() {
        let mut g = game("Super Neon Attack Kit Extra", &["snake"]);
        g.metadata = Some(GameMetadata {
            developer: Some("Snake Studio".to_string()),
            ..Default::default()
        });

        let all = SearchOptions::default();
        assert_eq!(score_game(&g, "snake", &all), 25.0 + 40.0 + 15.0);

        let no_fuzzy = SearchOptions {
            include_fuzzy: false,
            ..all
        };
        assert_eq!(score_game(&g, "snake", &no_fuzzy), 40.0 + 15.0);

        let no_tags = SearchOptions {
            include_tags: false,
            ..all
        };
        assert_eq!(score_game(&g, "snake", &no_tags), 25.0 + 15.0);

        let no_meta = SearchOptions {
            include_metadata: false,
            ..all
        };
        assert_eq!(score_game(&g, "snake", &no_meta), 25.0 + 40.0);
    }

    #[test]
    fn test_boosts_only_apply_to_matches() {
        let mut g = game("Tetris", &[]);
        g.popularity = 80;
        g.featured = true;
        assert_eq!(score(&g, "snake"), 0.0);
        assert!((score(&g, "tetris") - 113.0).abs() < 1e-9);
    }

    #[test]
    fn test_spam_test_scenario() {
        let catalog = Catalog::seeded().unwrap();
        let g = catalog.get_game_by_id("geometry-dash-spam-test").unwrap();
        let s = score(g, "spam");
        assert!(s >= 40.0 + 9.5 + 5.0);
        // name 50, description 30, tag 40, instructions 10, popularity 9.5, featured 5
        assert!((s - 144.5).abs() < 1e-9);
    }

    #[test]
    fn test_cache_key_distinguishes_options() {
        let a = SearchOptions::default();
        let b = SearchOptions {
            include_fuzzy: false,
            ..a
        };
        assert_ne!(a.cache_key(), b.cache_key());
    }
}
