//! # Estimator Configuration
//!
//! Settings for the database location, the HTTP listener and the rate
//! schedule.
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. Config file (`estimator.toml`, or the path given with `--config`)
//! 3. Environment variables (`CABFARE_*`)
//! 4. Validation
//!
//! ## Example `estimator.toml`
//! ```toml
//! [database]
//! path = "/var/lib/cabfare/cab_system.db"
//!
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [rates]
//! per_km_cents = 1200
//! peak_hours = [7, 8, 9, 17, 18, 19]
//!
//! [rates.promo_codes]
//! NEW50 = { kind = "flat", cents = 5000 }
//! ```

use cabfare_core::{CoreError, RateSchedule};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Default database file name inside the platform data directory.
pub const DEFAULT_DB_FILE: &str = "cab_system.db";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE: &str = "estimator.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Invalid rate schedule: {0}")]
    Rates(#[from] CoreError),

    #[error("No platform data directory available; set CABFARE_DB_PATH")]
    NoDataDir,
}

// =============================================================================
// Settings
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file. Unset means `<data dir>/cab_system.db`.
    pub path: Option<PathBuf>,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Estimator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub server: ServerSettings,

    /// Fare rules; omitted fields keep their defaults.
    pub rates: RateSchedule,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist. The default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::load`], reading environment variables through `env`.
    pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading estimator config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `CABFARE_DB_PATH`, `CABFARE_BIND_ADDR` and `CABFARE_PORT`.
    fn apply_env_overrides<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = env("CABFARE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(addr) = env("CABFARE_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = env("CABFARE_PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "CABFARE_PORT".to_string(),
                value: port.clone(),
            })?;
            debug!(port = self.server.port, "Overriding port from environment");
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "server.bind_addr".to_string(),
                value: self.server.bind_addr.clone(),
            });
        }

        self.rates.validate()?;
        Ok(())
    }

    /// Resolves the database file path.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().join(DEFAULT_DB_FILE))
                .ok_or(ConfigError::NoDataDir),
        }
    }

    /// `bind_addr:port` for the HTTP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "cabfare", "estimator")
}
