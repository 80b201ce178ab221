//! Resolver configuration.
//!
//! Settings can be loaded from and saved to a TOML file. A missing file
//! means defaults; an unreadable or malformed one is an error.

use evolve_common::{EvolveError, Rank};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration file name.
pub const CONFIG_FILE: &str = "evolve.toml";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the file.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize TOML.
    #[error("Failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<ConfigError> for EvolveError {
    fn from(err: ConfigError) -> Self {
        EvolveError::Config(err.to_string())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Highest rank reported as a leaf instead of expanded
    pub leaf_threshold: Rank,
    /// Rank whose entities are ranked as candidates
    pub candidate_rank: Rank,
    /// How many ranked candidates to report
    pub top_n: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            leaf_threshold: Rank::Common,
            candidate_rank: Rank::Special,
            top_n: 5,
        }
    }
}

impl ResolverConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Renders configuration as TOML text.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Saves configuration to a file, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ResolverConfig::from_toml_str("top_n = 3\n").expect("parse");
        assert_eq!(config.top_n, 3);
        assert_eq!(config.leaf_threshold, Rank::Common);
        assert_eq!(config.candidate_rank, Rank::Special);
    }

    #[test]
    fn test_bad_rank_is_error() {
        assert!(matches!(
            ResolverConfig::from_toml_str("leaf_threshold = \"Mythic\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_error_converts() {
        let err = ResolverConfig::from_toml_str("top_n = \"many\"\n").expect_err("bad type");
        let err: EvolveError = err.into();
        assert!(matches!(err, EvolveError::Config(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ResolverConfig::load_from(dir.path().join(CONFIG_FILE)).expect("load");
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = ResolverConfig {
            leaf_threshold: Rank::Uncommon,
            candidate_rank: Rank::Rare,
            top_n: 2,
        };
        config.save_to(&path).expect("save");
        assert_eq!(ResolverConfig::load_from(&path).expect("load"), config);
    }
}
