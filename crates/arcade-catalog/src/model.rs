//! Catalog data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A category games are grouped under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCategory {
    pub id: String,
    pub name: String,
    /// URL-safe, unique
    pub slug: String,
    pub description: String,
    /// Symbolic icon name
    pub icon: String,
    /// Symbolic color name
    pub color: String,
}

/// Optional descriptive metadata attached to a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl GameMetadata {
    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        self.developer.is_none() && self.controls.is_none() && self.instructions.is_none()
    }
}

/// A playable game in the catalog
///
/// The category is shared with every other game in it; games never own
/// their category.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Location of the embeddable game content
    pub url: String,
    pub category: Arc<GameCategory>,
    /// Ordered, duplicate-free
    pub tags: Vec<String>,
    pub featured: bool,
    /// 0-100
    pub popularity: u8,
    pub date_added: DateTime<Utc>,
    pub metadata: Option<GameMetadata>,
}

impl Game {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn developer(&self) -> Option<&str> {
        self.metadata.as_ref()?.developer.as_deref()
    }
}

/// A game as stored in a catalog file, referencing its category by id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub category_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub popularity: u8,
    pub date_added: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GameMetadata>,
}

/// On-disk catalog layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<GameCategory>,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

/// Sort key for filtered game lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Popularity,
    Name,
    DateAdded,
}

impl SortBy {
    /// Parse a sort key, returning `None` for anything unrecognised
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "popularity" => Some(SortBy::Popularity),
            "name" => Some(SortBy::Name),
            "dateadded" | "date_added" | "date-added" => Some(SortBy::DateAdded),
            _ => None,
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown sort key: {}", s))
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortBy::Popularity => "popularity",
            SortBy::Name => "name",
            SortBy::DateAdded => "dateAdded",
        };
        f.write_str(name)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query object for [`crate::GameIndex::filter_games`]
///
/// Every field is optional; an unset or empty field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameFilter {
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: SortOrder,
}

impl GameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort(mut self, sort_by: SortBy, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by);
        self.sort_order = order;
        self
    }
}
