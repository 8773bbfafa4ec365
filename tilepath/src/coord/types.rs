//! Coordinate type definitions

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Scheme-wide zoom bounds used when a source does not declare its own.
pub const MIN_ZOOM_LEVEL: u8 = 2;
pub const MAX_ZOOM_LEVEL: u8 = 20;

/// Tile coordinates in a power-of-two tile pyramid (Slippy Map numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileCoord {
    /// X coordinate (east-west), 0 at west
    pub col: u32,
    /// Y coordinate (north-south), 0 at north
    pub row: u32,
    /// Zoom level
    pub zoom: u8,
}

impl TileCoord {
    /// Creates a tile coordinate.
    #[inline]
    pub const fn new(col: u32, row: u32, zoom: u8) -> Self {
        Self { col, row, zoom }
    }

    /// Number of tiles along one axis at this tile's zoom level.
    ///
    /// Returns `None` when the grid is wider than `u64` can express, in which
    /// case every `u32` coordinate is inside the grid.
    #[inline]
    pub fn grid_size(&self) -> Option<u64> {
        grid_size(self.zoom)
    }

    /// Returns true if column and row are inside `[0, 2^zoom)`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        match self.grid_size() {
            Some(n) => u64::from(self.col) < n && u64::from(self.row) < n,
            None => true,
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.col, self.row)
    }
}

/// Number of tiles along one axis at `zoom`, if it fits in a `u64`.
#[inline]
pub fn grid_size(zoom: u8) -> Option<u64> {
    1u64.checked_shl(u32::from(zoom))
}

/// Errors that can occur during coordinate conversion and packing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is outside valid range (-85.05112878 to 85.05112878)
    #[error("Invalid latitude: {0} (must be between {} and {})", MIN_LAT, MAX_LAT)]
    InvalidLatitude(f64),

    /// Longitude is outside valid range (-180.0 to 180.0)
    #[error("Invalid longitude: {0} (must be between {} and {})", MIN_LON, MAX_LON)]
    InvalidLongitude(f64),

    /// Zoom level cannot be expressed in the target representation
    #[error("Invalid zoom level: {0}")]
    InvalidZoom(u8),

    /// Column or row exceeds the packing capacity
    #[error("Coordinate ({col}, {row}) exceeds {bits}-bit packing capacity")]
    CoordinateOverflow { col: u32, row: u32, bits: u32 },

    /// Packed identifier could not be parsed or has bits set above the zoom field
    #[error("Invalid packed tile id: {0}")]
    InvalidPackedId(String),
}
