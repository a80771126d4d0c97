//! Merge policy: defaults every build starts from.

pub mod service;

use crate::registry::DEFAULT_CLEANUP_DAYS;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("root_directory", "")?
        .set_default("cleanup_threshold_days", DEFAULT_CLEANUP_DAYS as i64)
}
