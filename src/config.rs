//! Configuration
//!
//! `LibraryConfig` is assembled by the `config` crate from defaults, the
//! global config file, an optional explicit file and `LEARNSPHERE_*`
//! environment variables, in increasing precedence.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::LibraryError;
use crate::logging::LoggingConfig;
use crate::registry::DEFAULT_CLEANUP_DAYS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Folder whose subdirectories form the home listing.
    pub root_directory: PathBuf,
    /// Registry file; `None` means the platform data directory.
    pub registry_path: Option<PathBuf>,
    pub cleanup_threshold_days: u32,
    pub logging: LoggingConfig,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root_directory: PathBuf::new(),
            registry_path: None,
            cleanup_threshold_days: DEFAULT_CLEANUP_DAYS,
            logging: LoggingConfig::default(),
        }
    }
}

impl LibraryConfig {
    /// Registry file to use, falling back to `<data dir>/registry.json`.
    pub fn resolved_registry_path(&self) -> Result<PathBuf, LibraryError> {
        match &self.registry_path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => paths::xdg_root::default_registry_path(),
        }
    }

    /// The root directory, or a `ConfigError` when it was never set.
    pub fn require_root(&self) -> Result<&PathBuf, LibraryError> {
        if self.root_directory.as_os_str().is_empty() {
            return Err(LibraryError::ConfigError(
                "root_directory is not configured (set LEARNSPHERE_ROOT_DIRECTORY)".to_string(),
            ));
        }
        Ok(&self.root_directory)
    }
}
