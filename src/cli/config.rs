//! Store configuration from arguments and environment

use super::args::Cli;
use super::errors::{CliError, CliResult};
use crate::store::StoreConfig;

const URI_SCHEMES: &[&str] = &["mongodb://", "mongodb+srv://"];

/// Builds and validates the store configuration.
///
/// The connection string comes from `--uri` or `MONGO_URI`.
pub fn store_config(cli: &Cli) -> CliResult<StoreConfig> {
    let uri = cli
        .uri
        .as_deref()
        .map(str::trim)
        .filter(|uri| !uri.is_empty())
        .ok_or_else(|| CliError::config_error("MONGO_URI is not set. Set it or pass --uri."))?;

    validate(uri, &cli.database, &cli.collection)?;

    Ok(StoreConfig::new(uri)
        .with_database(cli.database.as_str())
        .with_collection(cli.collection.as_str()))
}

fn validate(uri: &str, database: &str, collection: &str) -> CliResult<()> {
    if !URI_SCHEMES.iter().any(|scheme| uri.starts_with(scheme)) {
        return Err(CliError::config_error(format!(
            "Invalid connection string: must start with {}",
            URI_SCHEMES.join(" or ")
        )));
    }

    if database.trim().is_empty() {
        return Err(CliError::config_error("Database name must not be empty"));
    }

    if collection.trim().is_empty() {
        return Err(CliError::config_error("Collection name must not be empty"));
    }

    Ok(())
}
