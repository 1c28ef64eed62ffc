//! Configuration management for airdispatch.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::DEFAULT_FLIGHTS_PATH;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "airdispatch";

/// Environment variable prefix.
const ENV_PREFIX: &str = "AIRDISPATCH_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `AIRDISPATCH_`, sections split on
///    `__`, e.g. `AIRDISPATCH_STORAGE__FLIGHTS_PATH`)
/// 2. TOML config file at `~/.config/airdispatch/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the flights file.
    /// Defaults to `result/flights.json` in the working directory.
    pub flights_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, reading the TOML layer from `config_path` or from
    /// the default location when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.flights_path {
            if path.file_name().is_none() {
                return Err(Error::ConfigValidation {
                    message: format!("flights_path must name a file: {}", path.display()),
                });
            }
        }

        Ok(())
    }

    /// Get the flights file path, resolving defaults if not set.
    #[must_use]
    pub fn flights_path(&self) -> PathBuf {
        self.storage
            .flights_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FLIGHTS_PATH))
    }
}
