//! Game catalog for the arcade portal
//!
//! Holds the static game and category collections and the read-only views
//! derived from them: category aggregates, filtering, sorting and
//! content-based recommendations. The catalog is loaded once and never
//! mutated afterwards.

mod catalog;
mod categories;
mod games;
mod model;

#[cfg(test)]
mod fixtures;

pub use catalog::Catalog;
pub use categories::{CategoryIndex, CategoryStats, CategoryWithCount};
pub use games::{CatalogStats, GameIndex, UserPreferences};
pub use model::{
    CatalogFile, Game, GameCategory, GameFilter, GameMetadata, GameRecord, SortBy, SortOrder,
};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    NotFound(PathBuf),

    #[error("Game {game} references unknown category {category}")]
    UnknownCategory { game: String, category: String },

    #[error("Duplicate {kind} id: {id}")]
    Duplicate { kind: &'static str, id: String },

    #[error("Invalid catalog entry: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
