//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use tilepath::config::{config_file_path, ConfigFileError};
use tilepath::coord::CoordError;
use tilepath::source::TileSourceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Source catalog could not be loaded
    Catalog(ConfigFileError),
    /// No source with this name in the catalog
    UnknownSource(String),
    /// Source rejected the tile
    Address(TileSourceError),
    /// Invalid coordinate or packed id
    Coordinate(CoordError),
    /// Failed to serialize output
    Output(serde_json::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::UnknownSource(_) => {
                eprintln!();
                eprintln!("Run 'tilepath sources' to list the available sources.");
            }
            CliError::Catalog(_) => {
                eprintln!();
                eprintln!("Check the source catalog at {}", config_file_path().display());
            }
            _ => {}
        }

        process::exit(self.exit_code())
    }

    /// Usage errors exit with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnknownSource(_) | CliError::Address(_) | CliError::Coordinate(_) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Catalog(e) => write!(f, "Failed to load source catalog: {}", e),
            CliError::UnknownSource(name) => write!(f, "Unknown tile source '{}'", name),
            CliError::Address(e) => write!(f, "Cannot resolve tile: {}", e),
            CliError::Coordinate(e) => write!(f, "Invalid coordinate: {}", e),
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Catalog(e) => Some(e),
            CliError::Address(e) => Some(e),
            CliError::Coordinate(e) => Some(e),
            CliError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Catalog(e)
    }
}

impl From<TileSourceError> for CliError {
    fn from(e: TileSourceError) -> Self {
        CliError::Address(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Coordinate(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}
