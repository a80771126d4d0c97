//! Configuration sources.

pub mod environment;

/// Global config file, skipped when absent.
pub mod global_file {
    use config::builder::DefaultState;
    use config::{ConfigBuilder, ConfigError, File, FileFormat};
    use std::path::Path;

    pub fn add_to_builder(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(false),
        ))
    }
}

/// File named on the command line; must exist.
pub mod explicit_file {
    use config::builder::DefaultState;
    use config::{ConfigBuilder, ConfigError, File, FileFormat};
    use std::path::Path;

    pub fn add_to_builder(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(true),
        ))
    }
}
