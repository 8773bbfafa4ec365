//! Tile source configuration.
//!
//! A tile source is a base URL, a path template, a zoom range, an optional
//! credential, and the formatter that turns tiles into paths. Sources are
//! validated once by [`TileSourceBuilder`] and immutable afterwards.
//!
//! # Presets
//!
//! Common public servers are available through [`Preset`]:
//!
//! ```
//! use tilepath::source::Preset;
//! use tilepath::coord::TileCoord;
//!
//! let osm = Preset::OpenStreetMap.builder().build().unwrap();
//! assert_eq!(
//!     osm.tile_url(&TileCoord::new(5, 9, 4)),
//!     "https://tile.openstreetmap.org/4/5/9.png"
//! );
//! ```

mod builder;
mod config;
mod error;
mod presets;
mod shared;

pub use builder::{TileSourceBuilder, DEFAULT_KEY_NAME};
pub use config::TileSourceConfig;
pub use error::TileSourceError;
pub use presets::Preset;
pub use shared::SharedTileSource;
