//! Configuration manager for loading and saving the tracker configuration
//!
//! This module provides functionality to load and save configuration to
//! $SQUATCOUNT_HOME/config.json with atomic writes to prevent corruption.

use crate::config::models::TrackerConfig;
use crate::error::{Result, SquatCountError, StringError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the directory that holds config and logs
pub const HOME_ENV_VAR: &str = "SQUATCOUNT_HOME";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Directory holding `config.json` and the log files
    ///
    /// Returns: $SQUATCOUNT_HOME, or the current directory when unset
    pub fn get_home_dir() -> PathBuf {
        std::env::var_os(HOME_ENV_VAR).map_or_else(|| PathBuf::from("."), PathBuf::from)
    }

    /// Get the path to the configuration file
    ///
    /// Returns: $SQUATCOUNT_HOME/config.json
    pub fn get_config_path() -> PathBuf {
        Self::get_home_dir().join("config.json")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<TrackerConfig> {
        Self::load_from(&Self::get_config_path())
    }

    /// Load configuration from `path`
    ///
    /// A missing or corrupt file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<TrackerConfig> {
        if !path.exists() {
            info!(
                "Configuration file {} not found, using defaults",
                path.display()
            );
            return Ok(TrackerConfig::default());
        }

        let json = std::fs::read_to_string(path)?;

        match serde_json::from_str(&json) {
            Ok(config) => {
                info!("Configuration loaded from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(TrackerConfig::default())
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(config: &TrackerConfig) -> Result<()> {
        Self::save_to(config, &Self::get_config_path())
    }

    /// Save configuration to `path` with an atomic write
    ///
    /// Writes a temporary file in the same directory and persists it over `path`.
    pub fn save_to(config: &TrackerConfig, path: &Path) -> Result<()> {
        let config_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(config_dir)?;

        let json = serde_json::to_string_pretty(config)?;
        let mut temp = tempfile::NamedTempFile::new_in(config_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| {
            SquatCountError::ConfigError(StringError::new(format!(
                "Failed to replace {}: {}",
                path.display(),
                e.error
            )))
        })?;

        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}
