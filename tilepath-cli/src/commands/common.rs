//! Common helpers shared across CLI commands.

use std::fmt::Display;
use std::path::Path;

use serde::Serialize;
use tilepath::config::SourceCatalog;
use tilepath::source::TileSourceConfig;
use tracing::debug;

use crate::error::CliError;

/// Load the catalog from `--config`, or from the default location.
pub fn load_catalog(path: Option<&Path>) -> Result<SourceCatalog, CliError> {
    let catalog = match path {
        Some(path) => SourceCatalog::load_from(path)?,
        None => SourceCatalog::load()?,
    };
    debug!(sources = catalog.len(), "Catalog ready");
    Ok(catalog)
}

/// Look a source up by name, applying a command-line API key if given.
pub fn find_source(
    catalog: &SourceCatalog,
    name: &str,
    api_key: Option<String>,
) -> Result<TileSourceConfig, CliError> {
    let config = catalog
        .get(name)
        .ok_or_else(|| CliError::UnknownSource(name.to_string()))?;

    Ok(match api_key {
        Some(key) => config.with_api_key(Some(key)),
        None => config.clone(),
    })
}

/// Print a result as plain text or as pretty JSON.
pub fn emit<T: Serialize + Display>(value: &T, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}
