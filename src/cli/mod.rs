//! CLI module
//!
//! Provides command-line interface for:
//! - run: execute the query sequence and report each result (default)
//! - seed: load the sample books

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{query, run, run_command, seed};
pub use config::store_config;
pub use errors::{CliError, CliErrorCode, CliResult};
