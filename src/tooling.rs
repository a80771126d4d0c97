//! Tooling & Integration Layer
//!
//! The management CLI: registry inspection and maintenance, library scans
//! and course/progress reports.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
