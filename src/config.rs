//! Service configuration
//!
//! Loaded from a JSON file; every field has a default, so an empty object
//! is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read variant for singer queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadVariant {
    /// Band members are embedded in the singer document
    #[default]
    Embedded,
    /// Band members are computed by a read-time lookup against instruments
    Lookup,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid JSON
    #[error("invalid config JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Config parsed but holds an unusable value
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins. Empty means any origin is allowed.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Data file the store persists to (default: "./encore-data.json")
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Read variant for singer queries (default: embedded)
    #[serde(default)]
    pub read_variant: ReadVariant,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./encore-data.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            data_path: default_data_path(),
            read_variant: ReadVariant::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }
        if self.host.is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
