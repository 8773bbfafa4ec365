//! Coordinate projections applied before template substitution.

use std::fmt;

use crate::coord::TileCoord;

/// Maps tile coordinates onto the numbering a tile server expects.
///
/// Every method defaults to the identity, so an implementation only
/// overrides the axes it changes.
pub trait AddressProjection: Send + Sync + fmt::Debug {
    /// Column written for `{X}`.
    fn column(&self, tile: &TileCoord) -> u64 {
        u64::from(tile.col)
    }

    /// Row written for `{Y}`.
    fn row(&self, tile: &TileCoord) -> u64 {
        u64::from(tile.row)
    }

    /// Zoom written for `{Z}`.
    fn zoom(&self, tile: &TileCoord) -> u8 {
        tile.zoom
    }

    /// Short name used in configuration files and logs.
    fn name(&self) -> &'static str;
}

/// Standard XYZ numbering, row 0 at the north edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XyzProjection;

impl AddressProjection for XyzProjection {
    fn name(&self) -> &'static str {
        "xyz"
    }
}

/// TMS numbering, row 0 at the south edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TmsProjection;

impl AddressProjection for TmsProjection {
    fn row(&self, tile: &TileCoord) -> u64 {
        match tile.grid_size() {
            Some(n) => (n - 1).saturating_sub(u64::from(tile.row)),
            // Wider than u64: no server numbers tiles this deep
            None => u64::from(tile.row),
        }
    }

    fn name(&self) -> &'static str {
        "tms"
    }
}
