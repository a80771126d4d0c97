//! CLI Tooling
//!
//! Command-line interface for registry maintenance and library inspection.

use crate::config::{ConfigLoader, LibraryConfig};
use crate::error::LibraryError;
use crate::library::Library;
use crate::listing::ScanMode;
use crate::registry::{Registry, RegistrySection};
use crate::tooling::format::{
    format_course_text, format_listing_text, format_progress_text, format_registry_text,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// LearnSphere CLI - browse and maintain a local course library
#[derive(Parser)]
#[command(name = "learnsphere")]
#[command(about = "Classify course folders and manage the LearnSphere registry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Course library root (overrides root_directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Registry file (overrides registry_path)
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold the logging flags into the loaded configuration.
    ///
    /// `--log-file` is not folded in; it goes to
    /// [`crate::logging::init_logging_with_file`] so it outranks the environment.
    pub fn apply_logging_overrides(&self, config: &mut LibraryConfig) {
        let logging = &mut config.logging;
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all registry entries
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Remove entries not accessed recently
    Cleanup {
        /// Idle threshold in days (defaults to cleanup_threshold_days)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Replace the registry with an empty one
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// List the library root, classifying and registering folders
    Scan {
        /// Re-classify folders already in the registry
        #[arg(long)]
        force: bool,
    },
    /// Resolve an id to its registered path
    Resolve {
        id: String,
        /// Look in the directories section instead of courses
        #[arg(long)]
        directory: bool,
    },
    /// Show a course's modules, lessons and completion
    Course {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show stored lesson progress of a course
    Progress {
        course_id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// CLI context for executing commands
pub struct CliContext {
    config: LibraryConfig,
    library: Library,
}

impl CliContext {
    /// Create a new CLI context from config files, environment and flag overrides.
    pub fn new(
        config_path: Option<PathBuf>,
        root: Option<PathBuf>,
        registry_path: Option<PathBuf>,
    ) -> Result<Self, LibraryError> {
        let mut config = match &config_path {
            Some(path) => ConfigLoader::load_with_file(path)?,
            None => ConfigLoader::load()?,
        };
        if let Some(root) = root {
            config.root_directory = root;
        }
        if let Some(registry_path) = registry_path {
            config.registry_path = Some(registry_path);
        }
        Self::from_config(config)
    }

    pub fn from_config(config: LibraryConfig) -> Result<Self, LibraryError> {
        let registry = Registry::open(config.resolved_registry_path()?);
        let library = Library::new(config.root_directory.clone(), registry);
        Ok(Self { config, library })
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, LibraryError> {
        match command {
            Commands::Show { format } => self.handle_show(format),
            Commands::Cleanup { days } => {
                let days = days.unwrap_or(self.config.cleanup_threshold_days);
                let removed = self.library.registry().cleanup(days)?;
                Ok(format!(
                    "Removed {} entries not accessed in more than {} days",
                    removed, days
                ))
            }
            Commands::Clear { yes } => self.handle_clear(*yes),
            Commands::Scan { force } => {
                let mode = if *force {
                    ScanMode::ForceRefresh
                } else {
                    ScanMode::Cached
                };
                self.config.require_root()?;
                let scanned = self.library.home(mode)?;
                info!(
                    items = scanned.value.len(),
                    skipped = scanned.failures.len(),
                    "Scanned library root"
                );
                Ok(format_listing_text(&scanned.value, &scanned.failures))
            }
            Commands::Resolve { id, directory } => {
                let section = if *directory {
                    RegistrySection::Directories
                } else {
                    RegistrySection::Courses
                };
                let entry = self.library.registry().require_by_id(id, section)?;
                Ok(format!("{}\t{}", entry.path, entry.title))
            }
            Commands::Course { id, format } => {
                let view = self.library.open_course(id)?;
                match parse_format(format)? {
                    OutputFormat::Json => to_json(&view),
                    OutputFormat::Text => Ok(format_course_text(&view)),
                }
            }
            Commands::Progress { course_id, format } => {
                let record = self.library.course_progress(course_id)?.get()?;
                match parse_format(format)? {
                    OutputFormat::Json => to_json(&json!({
                        "course_id": course_id,
                        "stats": record.stats(),
                        "progress": record,
                    })),
                    OutputFormat::Text => Ok(format_progress_text(course_id, &record)),
                }
            }
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                LibraryError::ConfigError(format!("Failed to render configuration: {}", e))
            }),
        }
    }

    fn handle_show(&self, format: &str) -> Result<String, LibraryError> {
        let registry = self.library.registry();
        let document = registry.load()?;
        match parse_format(format)? {
            OutputFormat::Json => to_json(&document),
            OutputFormat::Text => Ok(format_registry_text(&document, &registry.location())),
        }
    }

    fn handle_clear(&self, yes: bool) -> Result<String, LibraryError> {
        let registry = self.library.registry();
        if !yes {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!("Clear all entries in {}?", registry.location()))
                .default(false)
                .interact()
                .map_err(|e| {
                    LibraryError::ConfigError(format!("Failed to get user input: {}", e))
                })?;

            if !confirmed {
                return Ok("Clear cancelled".to_string());
            }
        }
        registry.clear()?;
        Ok(format!("Cleared registry at {}", registry.location()))
    }
}

enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, LibraryError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(LibraryError::InvalidInput(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, LibraryError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| LibraryError::InvalidInput(format!("Failed to render JSON: {}", e)))
}
