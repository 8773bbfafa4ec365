//! Source catalog configuration.
//!
//! Sources are read from `~/.tilepath/sources.ini`, one section per source:
//!
//! ```ini
//! [openstreetmap]
//! api_key = abc
//!
//! [local]
//! url = http://localhost:8080/tiles
//! tile_path = /{Z}/{X}/{Y}.png
//! zoom_min = 0
//! zoom_max = 14
//! projection = tms
//! ```
//!
//! A section named after a [`Preset`](crate::source::Preset) overrides only
//! the keys it sets.

mod file;
mod parser;

pub use file::{config_directory, config_file_path, ConfigFileError, SourceCatalog};
