//! Server configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (TOML, path given on the command line or in GUESTBOOK_CONFIG)
//! 3. Environment variables (GUESTBOOK_* prefix)
//!
//! Environment variables take precedence over config file values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::signature::Signature;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "GUESTBOOK";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,

    /// JSON file of signatures loaded into the store at startup
    pub seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            seed_file: None,
        }
    }
}

/// Error type for loading configuration and seed data.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, message: String },
    InvalidEnv { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
            ConfigError::InvalidEnv { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from an optional file and the process environment.
    ///
    /// Without a path, GUESTBOOK_CONFIG is consulted. A missing file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var(format!("{}_CONFIG", ENV_PREFIX))
            .ok()
            .map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file, without env overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply GUESTBOOK_* overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = |name: &str| format!("{}_{}", ENV_PREFIX, name);

        if let Some(val) = lookup(&key("HOST")) {
            self.host = val;
        }

        if let Some(val) = lookup(&key("PORT")) {
            self.port = val.parse().map_err(|_| ConfigError::InvalidEnv {
                key: key("PORT"),
                value: val.clone(),
            })?;
        }

        if let Some(val) = lookup(&key("LOG_LEVEL")) {
            self.log_level = val;
        }

        if let Some(val) = lookup(&key("SEED_FILE")) {
            self.seed_file = if val.is_empty() { None } else { Some(PathBuf::from(val)) };
        }

        Ok(())
    }

    /// The `host:port` address to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Read the seed file, if one is configured.
    pub fn read_seed(&self) -> Result<Option<Vec<Signature>>, ConfigError> {
        let Some(path) = &self.seed_file else {
            return Ok(None);
        };
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })
    }
}
