//! bookstore-queries entry point
//!
//! Parses arguments and dispatches through `cli::run`. Configuration errors
//! are printed to stderr and exit non-zero; a failed query run is logged by
//! the command itself and exits normally.

use bookstore_queries::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
