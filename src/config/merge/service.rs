//! MergeService: orchestrates sources, applies merge policy, deserializes to LibraryConfig.

use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::LibraryConfig;
use config::ConfigError;
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<LibraryConfig, ConfigError> {
        let global = crate::config::paths::xdg_root::global_config_path();
        Self::load_from(global.as_deref(), explicit)
    }

    /// Same as [`MergeService::load`] with the global file location supplied.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<LibraryConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = match global {
            Some(path) => global_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = match explicit {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
