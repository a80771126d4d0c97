//! Platform directories for config, data and state.

use crate::error::LibraryError;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const APPLICATION: &str = "learnsphere";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", APPLICATION, APPLICATION)
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// `$XDG_CONFIG_HOME/learnsphere/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|home| home.join(APPLICATION).join("config.toml"))
}

pub fn default_registry_path() -> Result<PathBuf, LibraryError> {
    let dirs = project_dirs().ok_or_else(|| {
        LibraryError::ConfigError("Could not determine platform data directory".to_string())
    })?;
    Ok(dirs.data_dir().join("registry.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_path_layout() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with("learnsphere/config.toml"));
        }
    }
}
