//! Packed numeric tile identifiers.
//!
//! A packed id stores a full tile coordinate in a single integer:
//!
//! ```text
//! bits 0..20   column
//! bits 20..40  row
//! bits 40..48  zoom
//! ```
//!
//! The layout is part of the on-the-wire address format. Changing any of the
//! widths below re-addresses every tile ever published with it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::types::{CoordError, TileCoord};

/// Bits reserved for the column.
pub const COL_BITS: u32 = 20;

/// Bits reserved for the row.
pub const ROW_BITS: u32 = 20;

/// Bits reserved for the zoom level.
pub const ZOOM_BITS: u32 = 8;

const COL_MASK: u64 = (1 << COL_BITS) - 1;
const ROW_MASK: u64 = (1 << ROW_BITS) - 1;
const ZOOM_MASK: u64 = (1 << ZOOM_BITS) - 1;

const ROW_SHIFT: u32 = COL_BITS;
const ZOOM_SHIFT: u32 = COL_BITS + ROW_BITS;

/// Largest column or row the id can hold.
pub const MAX_PACKED_COORD: u32 = COL_MASK as u32;

/// A tile coordinate packed into one integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackedTileId(u64);

impl PackedTileId {
    /// Packs a coordinate, rejecting values that do not fit their field.
    ///
    /// `zoom` is the zoom to store, which for hierarchical addresses is the
    /// adjusted zoom rather than the tile's own.
    pub fn pack(col: u32, row: u32, zoom: u8) -> Result<Self, CoordError> {
        if u64::from(col) > COL_MASK || u64::from(row) > ROW_MASK {
            return Err(CoordError::CoordinateOverflow {
                col,
                row,
                bits: COL_BITS,
            });
        }
        Ok(Self::pack_masked(col, row, zoom))
    }

    /// Packs a coordinate, keeping only the low bits of each field.
    #[inline]
    pub fn pack_masked(col: u32, row: u32, zoom: u8) -> Self {
        let col = u64::from(col) & COL_MASK;
        let row = u64::from(row) & ROW_MASK;
        let zoom = u64::from(zoom) & ZOOM_MASK;
        Self(col | (row << ROW_SHIFT) | (zoom << ZOOM_SHIFT))
    }

    /// Reinterprets a raw integer, rejecting bits above the zoom field.
    pub fn from_raw(raw: u64) -> Result<Self, CoordError> {
        if raw >> (ZOOM_SHIFT + ZOOM_BITS) != 0 {
            return Err(CoordError::InvalidPackedId(raw.to_string()));
        }
        Ok(Self(raw))
    }

    #[inline]
    pub fn raw(&self) -> u64 {
        self.0
    }

    #[inline]
    pub fn column(&self) -> u32 {
        (self.0 & COL_MASK) as u32
    }

    #[inline]
    pub fn row(&self) -> u32 {
        ((self.0 >> ROW_SHIFT) & ROW_MASK) as u32
    }

    #[inline]
    pub fn zoom(&self) -> u8 {
        ((self.0 >> ZOOM_SHIFT) & ZOOM_MASK) as u8
    }

    /// Unpacks into a tile coordinate.
    #[inline]
    pub fn to_tile(&self) -> TileCoord {
        TileCoord::new(self.column(), self.row(), self.zoom())
    }
}

impl TryFrom<TileCoord> for PackedTileId {
    type Error = CoordError;

    fn try_from(tile: TileCoord) -> Result<Self, Self::Error> {
        Self::pack(tile.col, tile.row, tile.zoom)
    }
}

impl fmt::Display for PackedTileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PackedTileId {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s
            .trim()
            .parse()
            .map_err(|_| CoordError::InvalidPackedId(s.to_string()))?;
        Self::from_raw(raw)
    }
}
