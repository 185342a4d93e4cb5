//! Configuration management for the arcade portal
//!
//! Handles catalog location, search tuning, user-state limits and the
//! persistence backend. Configuration lives in TOML files; a user file is
//! layered over the system file and every missing key falls back to its
//! default.

mod sections;

pub use sections::{CatalogConfig, SearchConfig, StorageBackend, StorageConfig, UserConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Standard configuration paths
pub const CONFIG_DIR: &str = "/etc/arcade";
pub const USER_CONFIG_DIR: &str = "/var/lib/arcade";
pub const CONFIG_FILE: &str = "config.toml";

/// Main portal configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl PortalConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_layered(
            &Path::new(CONFIG_DIR).join(CONFIG_FILE),
            &Path::new(USER_CONFIG_DIR).join(CONFIG_FILE),
        )
    }

    /// Load the system file with the user file merged over it
    ///
    /// Either file may be missing; with neither present the defaults apply.
    pub fn load_layered(system: &Path, user: &Path) -> Result<Self, ConfigError> {
        let mut merged: Option<toml::Value> = None;

        for path in [system, user] {
            if !path.exists() {
                continue;
            }
            let contents = std::fs::read_to_string(path)?;
            let value: toml::Value = toml::from_str(&contents)?;
            tracing::debug!("Read configuration layer {}", path.display());
            match merged.as_mut() {
                Some(base) => merge_toml(base, value),
                None => merged = Some(value),
            }
        }

        let Some(merged) = merged else {
            tracing::warn!("No configuration file found, using defaults");
            return Ok(Self::default());
        };

        let config: Self = merged.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("search.cache_ttl_secs", self.search.cache_ttl_secs as usize),
            ("search.cache_capacity", self.search.cache_capacity),
            ("search.max_results", self.search.max_results),
            ("search.advanced_max_results", self.search.advanced_max_results),
            ("search.suggestion_limit", self.search.suggestion_limit),
            ("search.history_limit", self.search.history_limit),
            ("user.recently_played_limit", self.user.recently_played_limit),
        ];

        for (name, value) in checks {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be greater than 0", name)));
            }
        }

        Ok(())
    }
}

/// Helper function to merge TOML values
pub fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
