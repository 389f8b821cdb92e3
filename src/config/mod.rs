//! Configuration management.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, `RESEARCH_DIGEST__*` environment variables, and CLI flags (applied
//! by the binary).

mod file_config;

pub use file_config::{ConfigFile, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::summary::AbstractPolicy;
use crate::utils::DEFAULT_SIMILARITY_THRESHOLD;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "RESEARCH_DIGEST";

/// Configuration file name searched for in the working directory
pub const CONFIG_FILE_NAME: &str = "research-digest.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Merge, deduplication and ranking settings
    #[serde(default)]
    pub aggregate: AggregateSettings,

    /// Thematic summary settings
    #[serde(default)]
    pub summary: SummarySettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Aggregation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSettings {
    /// Drop near-duplicate titles
    #[serde(default)]
    pub deduplicate: bool,

    /// Word overlap ratio at which two titles are duplicates
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,

    /// Sort key name (citation, year, title); unknown names leave input order
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
}

impl Default for AggregateSettings {
    fn default() -> Self {
        Self {
            deduplicate: false,
            similarity_threshold: default_threshold(),
            sort_by: default_sort_by(),
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_sort_by() -> String {
    "citation".to_string()
}

/// Summary settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySettings {
    /// Keywords kept in the summary
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,

    /// Papers on the citation leaderboard
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Papers summarized, taken from the front of the input
    #[serde(default = "default_max_papers")]
    pub max_papers: usize,

    /// Treatment of inverted-index abstracts
    #[serde(default)]
    pub abstract_policy: AbstractPolicy,

    /// Stopwords added to the built-in list
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            top_keywords: default_top_keywords(),
            leaderboard_size: default_leaderboard_size(),
            max_papers: default_max_papers(),
            abstract_policy: AbstractPolicy::default(),
            extra_stopwords: Vec::new(),
        }
    }
}

fn default_top_keywords() -> usize {
    20
}

fn default_leaderboard_size() -> usize {
    10
}

fn default_max_papers() -> usize {
    100
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` for structured output, anything else for plain text
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from a file, layered with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from environment overrides and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(env_source())
        .build()?
        .try_deserialize()
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

/// Find a configuration file in the default locations
///
/// Looks for `research-digest.toml` in the working directory, then
/// `research-digest/config.toml` in the platform config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("research-digest").join("config.toml"))
        .filter(|path| path.is_file())
}
