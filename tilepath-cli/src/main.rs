//! tilepath CLI - Command-line interface
//!
//! Resolves tile coordinates into remote addresses using the source catalog
//! (`~/.tilepath/sources.ini` plus the built-in presets).

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use commands::common::{emit, load_catalog};
use commands::resolve::{LocateArgs, TileArgs};
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "tilepath")]
#[command(version, about = "Resolve map tile coordinates into remote addresses", long_about = None)]
struct Cli {
    /// Source catalog file (default: ~/.tilepath/sources.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the full address of a tile
    Url {
        #[command(flatten)]
        tile: TileArgs,

        /// API key to use instead of the configured one
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Print the formatter output for a tile, without base URL or key
    Path {
        #[command(flatten)]
        tile: TileArgs,
    },

    /// Print the address of the tile containing a latitude/longitude
    Locate(LocateArgs),

    /// Unpack a packed tile id into column, row and zoom
    Decode {
        /// Packed id as printed at the end of hierarchical addresses
        id: String,
    },

    /// List the available tile sources
    Sources,
}

fn main() {
    let cli = Cli::parse();

    let _logging_guard = match tilepath::logging::init_logging(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Url { tile, api_key } => {
            let catalog = load_catalog(config)?;
            emit(&commands::resolve::url(&catalog, &tile, api_key)?, cli.json)
        }
        Commands::Path { tile } => {
            let catalog = load_catalog(config)?;
            emit(&commands::resolve::path(&catalog, &tile)?, cli.json)
        }
        Commands::Locate(args) => {
            let catalog = load_catalog(config)?;
            emit(&commands::resolve::locate(&catalog, &args)?, cli.json)
        }
        Commands::Decode { id } => emit(&commands::decode::run(&id)?, cli.json),
        Commands::Sources => {
            let catalog = load_catalog(config)?;
            info!(sources = catalog.len(), "Listing tile sources");
            emit(&commands::sources::run(&catalog), cli.json)
        }
    }
}
