//! LearnSphere CLI Binary
//!
//! Management commands for the course registry and library.

use anyhow::Context;
use clap::Parser;
use learnsphere::config::ConfigLoader;
use learnsphere::logging::init_logging_with_file;
use learnsphere::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_with_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ConfigLoader::load().context("loading configuration")?,
    };
    if let Some(root) = &cli.root {
        config.root_directory = root.clone();
    }
    if let Some(registry) = &cli.registry {
        config.registry_path = Some(registry.clone());
    }
    cli.apply_logging_overrides(&mut config);
    init_logging_with_file(Some(&config.logging), cli.log_file.clone())
        .context("initializing logging")?;

    let context = CliContext::from_config(config)?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
