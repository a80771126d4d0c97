//! Error types for the course library.

use std::path::Path;
use thiserror::Error;

/// Errors surfaced by library operations.
///
/// Permission failures met while classifying or scanning directories are not
/// returned through this type; they are reported as [`crate::content::ScanFailure`]
/// markers alongside the degraded result.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A registry id, course, lesson or file did not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A relative path tried to escape its base directory.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A caller-supplied value was rejected before anything was written.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing a persisted JSON document failed.
    #[error("Storage error at {path}: {message}")]
    Storage { path: String, message: String },

    /// Filesystem enumeration was refused.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub fn storage(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        LibraryError::Storage {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn not_found_path(kind: &str, path: &Path) -> Self {
        LibraryError::NotFound(format!("{} {}", kind, path.display()))
    }

    /// True for errors the web boundary renders as a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LibraryError::NotFound(_) | LibraryError::InvalidPath(_))
    }
}

impl From<config::ConfigError> for LibraryError {
    fn from(err: config::ConfigError) -> Self {
        LibraryError::ConfigError(err.to_string())
    }
}
