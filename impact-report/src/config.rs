//! Dashboard configuration (TOML).
//!
//! Every field has a default, so an absent file or a partial file is fine:
//!
//! ```toml
//! data_path = "publications.csv"
//! default_entity_count = 5
//!
//! [columns]
//! entity = "Country"
//! ```

use std::path::{Path, PathBuf};

use impact_core::{ColumnMap, DatasetCache};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "impact-dashboard.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Source CSV.
    pub data_path: PathBuf,
    /// Entities pre-selected on start-up (first N in sorted order).
    pub default_entity_count: usize,
    /// Parent directory for timestamped exports.
    pub export_dir: PathBuf,
    /// Log destination for the terminal UI.
    pub log_file: PathBuf,
    /// `tracing` filter directive, e.g. `info` or `impact_core=debug`.
    pub log_level: String,
    pub columns: ColumnMap,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("publications.csv"),
            default_entity_count: 5,
            export_dir: PathBuf::from("exports"),
            log_file: PathBuf::from("impact-dashboard.log"),
            log_level: "info".into(),
            columns: ColumnMap::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load a config file, falling back to defaults when it does not exist.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".into()));
        }
        for (canonical, source) in self.columns.pairs() {
            if source.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "column name for '{canonical}' must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// The process-lifetime dataset memo for this config.
    pub fn dataset_cache(&self) -> DatasetCache {
        DatasetCache::new(&self.data_path, self.columns.clone())
    }
}
