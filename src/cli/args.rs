//! CLI argument definitions using clap
//!
//! Commands:
//! - bookstore-queries [run] [--format text|json]
//! - bookstore-queries seed [--reset]

use clap::{Parser, Subcommand};

use crate::runner::ReportFormat;
use crate::store::{DEFAULT_COLLECTION, DEFAULT_DATABASE};

/// Runs illustrative queries against the bookstore collection
#[derive(Parser, Debug)]
#[command(name = "bookstore-queries")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Connection string of the document store
    #[arg(long, env = "MONGO_URI", hide_env_values = true, global = true)]
    pub uri: Option<String>,

    /// Database holding the books collection
    #[arg(long, default_value = DEFAULT_DATABASE, global = true)]
    pub database: String,

    /// Collection holding the book records
    #[arg(long, default_value = DEFAULT_COLLECTION, global = true)]
    pub collection: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the query demonstration (default)
    Run {
        /// Report line format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Load the sample books into the collection
    Seed {
        /// Drop the collection before inserting
        #[arg(long)]
        reset: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The subcommand, `run` when none was given
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run {
            format: ReportFormat::Text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        <Cli as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_run() {
        let cli = Cli::try_parse_from(["bookstore-queries", "--uri", "mongodb://localhost"]).unwrap();

        assert_eq!(cli.database, "plp_bookstore");
        assert_eq!(cli.collection, "books");
        assert_eq!(
            cli.selected_command(),
            Command::Run {
                format: ReportFormat::Text
            }
        );
    }

    #[test]
    fn test_seed_with_reset() {
        let cli = Cli::try_parse_from([
            "bookstore-queries",
            "seed",
            "--reset",
            "--database",
            "scratch",
        ])
        .unwrap();

        assert_eq!(cli.selected_command(), Command::Seed { reset: true });
        assert_eq!(cli.database, "scratch");
    }

    #[test]
    fn test_json_format() {
        let cli = Cli::try_parse_from(["bookstore-queries", "run", "--format", "json"]).unwrap();
        assert_eq!(
            cli.selected_command(),
            Command::Run {
                format: ReportFormat::Json
            }
        );
    }
}
