//! CLI error types
//!
//! All CLI errors are fatal: main prints them to stderr and exits 1.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Store could not be opened or written
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Config file already exists
    #[error("config file {0:?} already exists")]
    AlreadyInitialized(PathBuf),

    /// Filesystem or server I/O failure
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl CliError {
    /// I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
