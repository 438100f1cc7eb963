//! CLI command implementations
//!
//! Each command builds its own runtime, opens the store once, and closes it
//! before returning.

use std::io::{self, Write};

use tokio::runtime::Runtime;
use uuid::Uuid;

use super::args::{Cli, Command};
use super::config::store_config;
use super::errors::{CliError, CliResult};
use crate::books::sample_books;
use crate::observability::{Logger, ObservationScope};
use crate::runner::{self, ReportFormat, Reporter};
use crate::store::StoreConfig;

/// Entry point: load `.env`, parse arguments, dispatch.
pub fn run() -> CliResult<()> {
    // A missing .env file is fine; the environment may already carry MONGO_URI.
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    Logger::set_run_id(Uuid::new_v4().to_string());

    run_command(&cli)
}

/// Dispatch a parsed command line
pub fn run_command(cli: &Cli) -> CliResult<()> {
    let config = store_config(cli)?;

    match cli.selected_command() {
        Command::Run { format } => query(&config, format),
        Command::Seed { reset } => seed(&config, reset),
    }
}

/// Run the query demonstration.
///
/// A failed run is logged and swallowed: the process still exits normally,
/// after the connection has been closed.
pub fn query(config: &StoreConfig, format: ReportFormat) -> CliResult<()> {
    let rt = runtime()?;

    let scope = ObservationScope::with_fields(
        "RUN",
        &[
            ("collection", config.collection.as_str()),
            ("database", config.database.as_str()),
        ],
    );

    match rt.block_on(runner::run_demo(config, Reporter::stdout(format))) {
        Ok(summary) => {
            let steps = summary.steps_completed.to_string();
            scope.complete_with_fields(&[("steps", steps.as_str())]);
        }
        Err(e) => scope.fail(&format!("{}: {}", e.code(), e)),
    }

    Ok(())
}

/// Load the sample books
pub fn seed(config: &StoreConfig, reset: bool) -> CliResult<()> {
    let rt = runtime()?;

    let inserted = rt.block_on(runner::seed(config, sample_books(), reset))?;

    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "Inserted {} books into {}.{}",
        inserted, config.database, config.collection
    )?;
    stdout.flush()?;

    Ok(())
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new().map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))
}
