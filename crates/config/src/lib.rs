//! Configuration loading, validation, and path layout for codebrain.
//!
//! Loads tool configuration from `<root>/config.toml` (root defaults to
//! `.claude` in the working directory) with environment variable overrides.
//! A missing file means defaults; a malformed one is an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod layout;

pub use layout::BrainLayout;

/// Directory name of the project-local brain.
pub const DEFAULT_ROOT: &str = ".claude";

/// Upper bound for `vendor.staleness_hours` (one year).
pub const MAX_STALENESS_HOURS: u64 = 24 * 365;

/// The root configuration structure.
///
/// Maps directly to `<root>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrainConfig {
    /// Solution memory settings
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Vendor spec tracking settings
    #[serde(default)]
    pub vendor: VendorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Recalled solutions must score strictly above this
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Maximum length of a solution digest key
    #[serde(default = "default_key_length")]
    pub key_length: usize,
}

fn default_similarity_threshold() -> f64 {
    0.5
}
fn default_key_length() -> usize {
    50
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            key_length: default_key_length(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Hours after which a synced spec is considered stale
    #[serde(default = "default_staleness_hours")]
    pub staleness_hours: u64,

    /// Directory holding the project's `package.json`
    #[serde(default = "default_manifest_dir")]
    pub manifest_dir: PathBuf,
}

fn default_staleness_hours() -> u64 {
    24
}
fn default_manifest_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            staleness_hours: default_staleness_hours(),
            manifest_dir: default_manifest_dir(),
        }
    }
}

impl BrainConfig {
    /// Load configuration from the default location (`<root>/config.toml`).
    ///
    /// Environment overrides:
    /// - `CODEBRAIN_ROOT`: brain root directory (see [`BrainConfig::root_dir`])
    /// - `CODEBRAIN_STALE_HOURS`: vendor staleness threshold in hours
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = BrainLayout::new(Self::root_dir()).config_path();
        let mut config = Self::load_from(&config_path)?;

        if let Ok(hours) = std::env::var("CODEBRAIN_STALE_HOURS") {
            config.vendor.staleness_hours = hours.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "CODEBRAIN_STALE_HOURS must be a whole number of hours, got '{hours}'"
                ))
            })?;
            config.validate()?;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// The brain root directory: `CODEBRAIN_ROOT`, else `./.claude`.
    pub fn root_dir() -> PathBuf {
        std::env::var("CODEBRAIN_ROOT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
    }

    /// Staleness threshold as a duration.
    pub fn staleness_threshold(&self) -> chrono::Duration {
        let hours = self.vendor.staleness_hours.min(MAX_STALENESS_HOURS);
        chrono::Duration::hours(hours as i64)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.memory.similarity_threshold;
        if !(0.0..1.0).contains(&threshold) {
            return Err(ConfigError::ValidationError(
                "memory.similarity_threshold must be in [0.0, 1.0)".into(),
            ));
        }

        if self.memory.key_length == 0 {
            return Err(ConfigError::ValidationError(
                "memory.key_length must be > 0".into(),
            ));
        }

        if self.vendor.staleness_hours == 0 || self.vendor.staleness_hours > MAX_STALENESS_HOURS {
            return Err(ConfigError::ValidationError(format!(
                "vendor.staleness_hours must be between 1 and {MAX_STALENESS_HOURS}"
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
