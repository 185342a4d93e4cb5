//! Composition root: builds every service from one configuration

use anyhow::{Context, Result};
use arcade_catalog::{Catalog, CategoryIndex, GameIndex};
use arcade_config::{PortalConfig, StorageBackend};
use arcade_search::SearchEngine;
use arcade_storage::{KeyValueStore, MemoryStore, SqliteStore, UserState};
use std::sync::Arc;
use tracing::info;

/// All portal services, sharing one catalog and one store
pub struct Portal {
    pub catalog: Arc<Catalog>,
    pub games: GameIndex,
    pub categories: CategoryIndex,
    pub search: SearchEngine,
    pub user: UserState,
}

impl Portal {
    /// Load the catalog and open the configured store
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("loading catalog from {}", path.display()))?,
            None => Catalog::seeded().context("loading built-in catalog")?,
        };

        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Sqlite => Arc::new(
                SqliteStore::open(&config.storage.path).with_context(|| {
                    format!("opening state store {}", config.storage.path.display())
                })?,
            ),
        };

        info!(
            "Portal ready: {} games, {:?} storage",
            catalog.len(),
            config.storage.backend
        );

        Ok(Self::with_store(Arc::new(catalog), store, config))
    }

    /// Wire services around an existing catalog and store
    pub fn with_store(
        catalog: Arc<Catalog>,
        store: Arc<dyn KeyValueStore>,
        config: &PortalConfig,
    ) -> Self {
        Self {
            games: GameIndex::new(Arc::clone(&catalog)),
            categories: CategoryIndex::new(Arc::clone(&catalog)),
            search: SearchEngine::new(Arc::clone(&catalog), Arc::clone(&store), &config.search),
            user: UserState::new(Arc::clone(&catalog), store)
                .with_recently_played_limit(config.user.recently_played_limit),
            catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_config_with_sqlite() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = PortalConfig::default();
        config.storage.path = temp_dir.path().join("state.db");

        {
            let portal = Portal::from_config(&config).unwrap();
            assert_eq!(portal.catalog.len(), 7);
            portal.user.add_to_recently_played("geometry-dash-wave");
        }

        let portal = Portal::from_config(&config).unwrap();
        assert_eq!(portal.user.recently_played_ids(), vec!["geometry-dash-wave"]);
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let mut config = PortalConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.catalog.path = Some("/nonexistent/catalog.json".into());

        let err = Portal::from_config(&config).err().unwrap();
        assert!(format!("{:#}", err).contains("loading catalog"));
    }

    #[test]
    fn test_user_limit_from_config() {
        let mut config = PortalConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.user.recently_played_limit = 1;

        let portal = Portal::from_config(&config).unwrap();
        portal.user.add_to_recently_played("a");
        portal.user.add_to_recently_played("b");
        assert_eq!(portal.user.recently_played_ids(), vec!["b"]);
    }
}
