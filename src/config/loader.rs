//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use chrono::Weekday;
use tracing::info;

use crate::calculation::SplitPolicy;
use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineMetadata};

/// Name of the configuration file inside a configuration directory.
pub const CONFIG_FILE_NAME: &str = "engine.yaml";

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads `engine.yaml` from a directory, validates it, and
/// keeps the derived [`SplitPolicy`] ready for the calculation functions.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── engine.yaml   # Reporting, validation and server settings
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Loaded engine: {}", loader.engine().name);
/// # Ok::<(), timesheet_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    policy: SplitPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` is missing
    /// - the file contains invalid YAML
    /// - a value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(CONFIG_FILE_NAME);
        let config = Self::load_yaml::<EngineConfig>(&config_path)?;
        let loader = Self::from_config(config)?;

        info!(
            path = %config_path.display(),
            engine = %loader.engine().name,
            version = %loader.engine().version,
            "Loaded engine configuration"
        );

        Ok(loader)
    }

    /// Builds a loader from an already-constructed configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::config::{ConfigLoader, EngineConfig};
    ///
    /// let loader = ConfigLoader::from_config(EngineConfig::default())?;
    /// assert_eq!(loader.policy().display_decimal_places, 2);
    /// # Ok::<(), timesheet_engine::error::EngineError>(())
    /// ```
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let policy = config.split_policy()?;
        Ok(Self { config, policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.config.engine
    }

    /// Returns the split policy derived from the configuration.
    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    /// Returns the configured first day of the week.
    pub fn week_start(&self) -> Weekday {
        self.config.reporting.week_start
    }

    /// Returns the configured listen address.
    pub fn bind_address(&self) -> &str {
        &self.config.server.bind_address
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            policy: SplitPolicy::default(),
        }
    }
}
