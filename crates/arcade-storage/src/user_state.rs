//! Per-user state: recently played games and favorites

use crate::{KeyValueStore, keys, load_json, remove_key, save_json};
use arcade_catalog::{Catalog, Game};
use std::sync::Arc;

pub const DEFAULT_RECENTLY_PLAYED_LIMIT: usize = 10;

/// Recently played and favorite games for the current user
///
/// Ids are stored as-is; resolving them against the catalog happens on
/// read, and ids that no longer resolve are skipped. No operation returns
/// an error: a failing store leaves reads empty and writes dropped.
pub struct UserState {
    catalog: Arc<Catalog>,
    store: Arc<dyn KeyValueStore>,
    recently_played_limit: usize,
}

impl UserState {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog,
            store,
            recently_played_limit: DEFAULT_RECENTLY_PLAYED_LIMIT,
        }
    }

    /// Override the recently played cap
    pub fn with_recently_played_limit(mut self, limit: usize) -> Self {
        self.recently_played_limit = limit;
        self
    }

    /// Move `game_id` to the front of the recently played list
    pub fn add_to_recently_played(&self, game_id: &str) {
        let mut ids = self.recently_played_ids();
        ids.retain(|id| id != game_id);
        ids.insert(0, game_id.to_string());
        ids.truncate(self.recently_played_limit);
        save_json(self.store.as_ref(), keys::RECENTLY_PLAYED, &ids);
    }

    /// Stored ids, most recent first
    pub fn recently_played_ids(&self) -> Vec<String> {
        load_json(self.store.as_ref(), keys::RECENTLY_PLAYED).unwrap_or_default()
    }

    pub fn get_recently_played(&self) -> Vec<&Game> {
        self.resolve(self.recently_played_ids())
    }

    pub fn clear_recently_played(&self) {
        remove_key(self.store.as_ref(), keys::RECENTLY_PLAYED);
    }

    /// Add or remove a favorite, returning whether it is now a favorite
    pub fn toggle_favorite(&self, game_id: &str) -> bool {
        let mut ids = self.favorite_ids();
        let now_favorite = match ids.iter().position(|id| id == game_id) {
            Some(pos) => {
                ids.remove(pos);
                false
            }
            None => {
                ids.push(game_id.to_string());
                true
            }
        };
        save_json(self.store.as_ref(), keys::FAVORITES, &ids);
        now_favorite
    }

    pub fn is_favorite(&self, game_id: &str) -> bool {
        self.favorite_ids().iter().any(|id| id == game_id)
    }

    pub fn favorite_ids(&self) -> Vec<String> {
        load_json(self.store.as_ref(), keys::FAVORITES).unwrap_or_default()
    }

    pub fn get_favorites(&self) -> Vec<&Game> {
        self.resolve(self.favorite_ids())
    }

    pub fn clear_favorites(&self) {
        remove_key(self.store.as_ref(), keys::FAVORITES);
    }

    fn resolve(&self, ids: Vec<String>) -> Vec<&Game> {
        ids.iter()
            .filter_map(|id| self.catalog.get_game_by_id(id))
            .collect()
    }
}
