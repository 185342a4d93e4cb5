//! Catalog store: the static game and category collections

use crate::{CatalogError, CatalogFile, Game, GameCategory, GameRecord};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Seed catalog compiled into the binary
const SEED_CATALOG: &str = include_str!("../data/catalog.json");

/// Read-only game and category collections
///
/// Games and categories keep the order they were loaded in; that order is
/// the tie-breaker for every stable sort in this crate.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Arc<GameCategory>>,
    games: Vec<Game>,
    game_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, resolving each game's category reference
    pub fn new(
        categories: Vec<GameCategory>,
        records: Vec<GameRecord>,
    ) -> Result<Self, CatalogError> {
        let mut slugs = HashSet::new();
        let mut by_id: HashMap<String, Arc<GameCategory>> = HashMap::new();
        let mut shared = Vec::with_capacity(categories.len());

        for category in categories {
            if !slugs.insert(category.slug.clone()) {
                return Err(CatalogError::Duplicate {
                    kind: "category slug",
                    id: category.slug,
                });
            }
            let category = Arc::new(category);
            if by_id
                .insert(category.id.clone(), Arc::clone(&category))
                .is_some()
            {
                return Err(CatalogError::Duplicate {
                    kind: "category",
                    id: category.id.clone(),
                });
            }
            shared.push(category);
        }

        let mut games = Vec::with_capacity(records.len());
        let mut game_index = HashMap::new();

        for record in records {
            let category = by_id.get(&record.category_id).cloned().ok_or_else(|| {
                CatalogError::UnknownCategory {
                    game: record.id.clone(),
                    category: record.category_id.clone(),
                }
            })?;

            if record.popularity > 100 {
                return Err(CatalogError::Invalid(format!(
                    "game {} has popularity {} (expected 0-100)",
                    record.id, record.popularity
                )));
            }

            if game_index.insert(record.id.clone(), games.len()).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: "game",
                    id: record.id,
                });
            }

            let mut tags: Vec<String> = Vec::with_capacity(record.tags.len());
            for tag in record.tags {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }

            games.push(Game {
                id: record.id,
                name: record.name,
                description: record.description,
                image: record.image,
                url: record.url,
                category,
                tags,
                featured: record.featured,
                popularity: record.popularity,
                date_added: record.date_added,
                metadata: record.metadata.filter(|m| !m.is_empty()),
            });
        }

        tracing::debug!(
            "Catalog loaded: {} games, {} categories",
            games.len(),
            shared.len()
        );

        Ok(Self {
            categories: shared,
            games,
            game_index,
        })
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.categories, file.games)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        tracing::info!("Catalog loaded from {}", path.display());
        Ok(catalog)
    }

    /// The catalog shipped with the portal
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::from_json(SEED_CATALOG)
    }

    /// All games in catalog order
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Owned copy of every game
    pub fn get_all_games(&self) -> Vec<Game> {
        self.games.clone()
    }

    pub fn get_game_by_id(&self, id: &str) -> Option<&Game> {
        self.game_index.get(id).map(|&idx| &self.games[idx])
    }

    /// All categories in catalog order
    pub fn categories(&self) -> &[Arc<GameCategory>] {
        &self.categories
    }

    /// Owned copy of every category
    pub fn get_all_categories(&self) -> Vec<GameCategory> {
        self.categories.iter().map(|c| c.as_ref().clone()).collect()
    }

    pub fn get_category_by_id(&self, id: &str) -> Option<&GameCategory> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.as_ref())
    }

    pub fn get_category_by_slug(&self, slug: &str) -> Option<&GameCategory> {
        self.categories
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.as_ref())
    }

    pub fn get_games_by_category(&self, category_id: &str) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|g| g.category.id == category_id)
            .collect()
    }

    pub fn get_featured_games(&self) -> Vec<&Game> {
        self.games.iter().filter(|g| g.featured).collect()
    }

    /// Most popular games first
    pub fn get_popular_games(&self, limit: usize) -> Vec<&Game> {
        let mut games: Vec<&Game> = self.games.iter().collect();
        games.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        games.truncate(limit);
        games
    }

    /// Most recently added games first
    pub fn get_recent_games(&self, limit: usize) -> Vec<&Game> {
        let mut games: Vec<&Game> = self.games.iter().collect();
        games.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        games.truncate(limit);
        games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn category(id: &str) -> GameCategory {
        GameCategory {
            id: id.to_string(),
            name: id.to_uppercase(),
            slug: id.to_string(),
            description: String::new(),
            icon: "star".to_string(),
            color: "blue".to_string(),
        }
    }

    fn record(id: &str, category_id: &str) -> GameRecord {
        GameRecord {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            image: String::new(),
            url: String::new(),
            category_id: category_id.to_string(),
            tags: vec!["a".to_string(), "b".to_string(), "a".to_string()],
            featured: false,
            popularity: 10,
            date_added: "2024-01-01T00:00:00Z".parse().unwrap(),
            metadata: None,
        }
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = Catalog::seeded().unwrap();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.categories().len(), 6);
        assert!(catalog.get_game_by_id("geometry-dash-spam-test").is_some());
    }

    #[test]
    fn test_lookup_returns_equal_record() {
        let catalog = Catalog::seeded().unwrap();
        for game in catalog.games() {
            assert_eq!(catalog.get_game_by_id(&game.id), Some(game));
        }
        assert!(catalog.get_game_by_id("missing").is_none());
    }

    #[test]
    fn test_category_lookups() {
        let catalog = Catalog::seeded().unwrap();
        assert_eq!(
            catalog.get_category_by_id("puzzle").map(|c| c.name.as_str()),
            Some("Puzzle")
        );
        assert!(catalog.get_category_by_slug("geometry-dash").is_some());
        assert!(catalog.get_category_by_slug("nope").is_none());
    }

    #[test]
    fn test_games_by_category_closure() {
        let catalog = Catalog::seeded().unwrap();
        for category in catalog.categories() {
            let games = catalog.get_games_by_category(&category.id);
            let expected = catalog
                .games()
                .iter()
                .filter(|g| g.category.id == category.id)
                .count();
            assert_eq!(games.len(), expected);
            assert!(games.iter().all(|g| g.category.id == category.id));
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = Catalog::new(vec![category("a")], vec![record("g", "b")]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { .. }));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::new(
            vec![category("a")],
            vec![record("g", "a"), record("g", "a")],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { kind: "game", .. }));

        let err = Catalog::new(vec![category("a"), category("a")], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
    }

    #[test]
    fn test_tags_deduplicated() {
        let catalog = Catalog::new(vec![category("a")], vec![record("g", "a")]).unwrap();
        assert_eq!(catalog.games()[0].tags, vec!["a", "b"]);
    }

    #[test]
    fn test_popularity_out_of_range() {
        let mut rec = record("g", "a");
        rec.popularity = 101;
        let err = Catalog::new(vec![category("a")], vec![rec]).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));
    }

    #[test]
    fn test_popular_and_recent() {
        let catalog = Catalog::seeded().unwrap();
        let popular = catalog.get_popular_games(2);
        assert_eq!(popular[0].id, "geometry-dash-lite");
        assert_eq!(popular[1].id, "geometry-dash-spam-test");

        let recent = catalog.get_recent_games(1);
        assert_eq!(recent[0].id, "geometry-dash-scratch");

        assert_eq!(catalog.get_featured_games().len(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", SEED_CATALOG).unwrap();

        let catalog = Catalog::load(temp_file.path()).unwrap();
        assert_eq!(catalog.len(), 7);

        let missing = Catalog::load(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(missing, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::Json(_))
        ));
    }
}
