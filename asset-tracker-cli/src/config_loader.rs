//! Persistent CLI Configuration Loader
//!
//! This module provides platform-aware configuration file loading for the asset tracker.
//! Configuration is loaded from `~/.config/asset-tracker/config.toml` on Linux,
//! `~/Library/Application Support/asset-tracker/config.toml` on macOS
//! or `%APPDATA%\asset-tracker\config.toml` on Windows.

use std::path::{Path, PathBuf};

use asset_tracker::{AssetError, Office, OfficeTable, TrackerConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// SQLite URL of the asset database.
    pub database: Option<String>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
    /// Color urgent and warning rows in the report.
    pub color: Option<bool>,
    /// Replaces the built-in office table when present.
    pub offices: Option<Vec<Office>>,
}

impl CliConfig {
    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("asset-tracker"))
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Attempts to load configuration from `path`, or from the default location.
    /// Returns `CliConfig::default()` if the file doesn't exist or fails to parse.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Some(p) => p,
                None => {
                    debug!("Could not determine config directory");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<CliConfig>(&content) {
                Ok(config) => {
                    debug!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Builds the runtime configuration. A database URL given on the command
    /// line wins over the file.
    ///
    /// # Errors
    /// An office table that parses but is inconsistent (duplicates, bad
    /// rates) is rejected rather than replaced by the defaults.
    pub fn resolve(&self, database_override: Option<&str>) -> Result<TrackerConfig, AssetError> {
        let mut config = TrackerConfig::new();

        if let Some(url) = database_override.or(self.database.as_deref()) {
            config = config.with_database_url(url);
        }
        if let Some(offices) = &self.offices {
            config = config.with_offices(OfficeTable::new(offices.clone())?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)?;
        debug!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// The configuration written by `init-config`.
    pub fn sample() -> Self {
        let defaults = TrackerConfig::default();
        CliConfig {
            database: Some(defaults.database_url),
            enable_logging: Some(false),
            color: Some(true),
            offices: Some(defaults.offices.iter().cloned().collect()),
        }
    }

    /// Creates a sample configuration file at `path` or the default location.
    pub fn create_sample(path: Option<&Path>) -> Result<PathBuf, std::io::Error> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "Could not determine config directory")
            })?,
        };
        Self::sample().save_to(&path)?;
        Ok(path)
    }
}
