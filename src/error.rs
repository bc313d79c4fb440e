//! Error types for the configuration store.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and persistence errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ParseFailed { path: PathBuf, message: String },

    #[error("Config file '{path}' must contain a JSON object at the top level, found {found}")]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("Failed to write config file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config for '{path}': {message}")]
    SerializeFailed { path: PathBuf, message: String },
}

impl ConfigError {
    /// Returns the file path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConfigError::ReadFailed { path, .. }
            | ConfigError::ParseFailed { path, .. }
            | ConfigError::NotAnObject { path, .. }
            | ConfigError::WriteFailed { path, .. }
            | ConfigError::SerializeFailed { path, .. } => path,
        }
    }

    /// Returns true if the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::ReadFailed { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
