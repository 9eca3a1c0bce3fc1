//! Store Configuration
//!
//! `store.json` in the app config directory: collection name, database file
//! and access rules. A missing file is created with development defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use task_schema::COLLECTION;

use crate::policy::AccessRules;

/// File name of the store configuration
pub const CONFIG_FILE: &str = "store.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Collection (table) holding the to-do documents
    pub collection: String,
    /// SQLite file name, relative to the app data directory
    pub database_file: String,
    pub rules: AccessRules,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection: COLLECTION.to_string(),
            database_file: "todos.db".to_string(),
            rules: AccessRules::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid collection name {0:?}: use ASCII letters, digits and underscores")]
    InvalidCollection(String),
    #[error("database_file must not be empty")]
    EmptyDatabaseFile,
}

impl StoreConfig {
    /// Load `store.json` from `config_dir`, writing the defaults when absent
    pub fn load_or_init(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);

        if !path.exists() {
            let config = Self::default();
            config.save(&path)?;
            log::info!("Wrote default store config to {}", path.display());
            return Ok(config);
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?;
        config.validate()?;
        Ok(config)
    }

    fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_name = !self.collection.is_empty()
            && self
                .collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(ConfigError::InvalidCollection(self.collection.clone()));
        }
        if self.database_file.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseFile);
        }
        Ok(())
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }
}
