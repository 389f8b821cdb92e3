//! Configuration file support for research-digest.
//!
//! Reads and writes the TOML file without environment layering; used to
//! create a starter file and by tools that edit it.
//!
//! # Configuration File Format
//!
//! ```toml
//! [aggregate]
//! deduplicate = true
//! similarity_threshold = 0.85
//! sort_by = "citation"
//!
//! [summary]
//! top_keywords = 20
//! leaderboard_size = 10
//! max_papers = 100
//! abstract_policy = "reconstruct"
//! extra_stopwords = ["model", "models"]
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Config;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(flatten)]
    pub config: Config,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }

    /// Consume the file, returning the configuration it holds
    pub fn into_config(self) -> Config {
        self.config
    }
}

impl From<Config> for ConfigFile {
    fn from(config: Config) -> Self {
        Self { config }
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
