//! tilepath - Tile address resolution for map tile servers
//!
//! Turns a tile coordinate (column, row, zoom) into the remote address a tile
//! server publishes it under. Two path layouts are supported:
//!
//! - **Template**: `{X}`, `{Y}` and `{Z}` placeholders substituted into a
//!   path template such as `/{Z}/{X}/{Y}.png`
//! - **Hierarchical quadkey**: nested directories of 4-bit column/row digits
//!   followed by a packed 64-bit tile id
//!
//! # Example
//!
//! ```
//! use tilepath::{TileCoord, TileSourceBuilder};
//!
//! let source = TileSourceBuilder::new("https://tile.example.org", "/{Z}/{X}/{Y}.png")
//!     .api_key("abc")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     source.tile_url(&TileCoord::new(5, 9, 4)),
//!     "https://tile.example.org/4/5/9.png?key=abc"
//! );
//! ```
//!
//! Fetching, caching and decoding tiles are out of scope; this crate only
//! produces addresses.

pub mod address;
pub mod config;
pub mod coord;
pub mod logging;
pub mod source;

pub use address::{AddressFormatter, HierarchicalQuadkeyFormatter, TileAddressFormatter};
pub use config::{ConfigFileError, SourceCatalog};
pub use coord::{PackedTileId, TileCoord};
pub use source::{Preset, SharedTileSource, TileSourceBuilder, TileSourceConfig, TileSourceError};
