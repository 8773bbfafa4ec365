//! Hierarchical quadkey-style addresses.
//!
//! Tiles are spread over nested directories so that no directory on the tile
//! server holds more than 256 entries. A tile at adjusted zoom `z` gets
//! `ceil((z - 3) / 4)` directory levels; each level is named by two decimal
//! pairs, the tile's column and row digits in base 16 at that depth:
//!
//! ```text
//! 18/0102/0312/0800/1005/19980272875695.png
//! ^^ ^^^^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^
//! |  directory levels    packed id (column, row, zoom)
//! adjusted zoom
//! ```
//!
//! The packed id alone identifies the tile; the directory prefix only bounds
//! fan-out. When the zoom is clamped below the tile's own zoom, the bits the
//! levels cannot hold fold into the outermost pair, which may then exceed 15:
//!
//! ```text
//! tile (5000, 3, 14), bounds [0, 8]  ->  8/1900/0800/8796096172936
//! ```

use std::fmt::{self, Write};

use tracing::warn;

use super::TileAddressFormatter;
use crate::coord::{PackedTileId, TileCoord, MAX_PACKED_COORD, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};
use crate::source::{TileSourceConfig, TileSourceError};

/// Bits of each coordinate consumed per directory level.
const BITS_PER_LEVEL: u32 = 4;

/// Zoom levels covered without any directory level.
const FLAT_ZOOM_LEVELS: i32 = 3;

/// Fixed constants of an addressing scheme.
///
/// The adjusted zoom is `clamped + (reference_depth - method_config)`. Both
/// constants are baked into every published address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadkeyProfile {
    pub reference_depth: i32,
    pub method_config: i32,
}

impl QuadkeyProfile {
    /// Profile used by the published tile sets: zoom offset 0.
    pub const DEFAULT: Self = Self {
        reference_depth: 8,
        method_config: 8,
    };

    #[inline]
    pub fn zoom_offset(&self) -> i32 {
        self.reference_depth - self.method_config
    }
}

impl Default for QuadkeyProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One directory level: column and row digits at that depth.
///
/// Inner levels always hold a single base-16 digit. The outermost level holds
/// every remaining high bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPair {
    pub col: u32,
    pub row: u32,
}

impl fmt::Display for LevelPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_padded(f, self.col)?;
        write_padded(f, self.row)?;
        f.write_char('/')
    }
}

/// Single-sided padding: values up to 9 gain a leading zero, larger values
/// are written as-is.
fn write_padded(f: &mut impl Write, value: u32) -> fmt::Result {
    if value > 9 {
        write!(f, "{}", value)
    } else {
        write!(f, "0{}", value)
    }
}

/// A resolved hierarchical address, before the file suffix is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchicalAddress {
    /// Adjusted zoom, the leading path component.
    pub zoom: u8,
    /// Directory levels from outermost to innermost.
    pub levels: Vec<LevelPair>,
    /// Packed column/row/zoom identifier.
    pub id: PackedTileId,
}

impl fmt::Display for HierarchicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/", self.zoom)?;
        for level in &self.levels {
            write!(f, "{}", level)?;
        }
        write!(f, "{}", self.id)
    }
}

/// Number of directory levels for an adjusted zoom: `ceil((zoom - 3) / 4)`,
/// never negative.
#[inline]
pub fn level_count(zoom: u8) -> u32 {
    let above_flat = i32::from(zoom) - FLAT_ZOOM_LEVELS;
    if above_flat <= 0 {
        0
    } else {
        (above_flat as u32).div_ceil(BITS_PER_LEVEL)
    }
}

/// Formats tiles as `<zoom>/<levels><packed id><suffix>`.
///
/// The zoom is clamped to the formatter's own bounds before the profile's
/// offset is applied. The suffix is the trailing literal of the source's
/// path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchicalQuadkeyFormatter {
    zoom_floor: u8,
    zoom_ceil: u8,
    profile: QuadkeyProfile,
}

impl Default for HierarchicalQuadkeyFormatter {
    fn default() -> Self {
        Self {
            zoom_floor: MIN_ZOOM_LEVEL,
            zoom_ceil: MAX_ZOOM_LEVEL,
            profile: QuadkeyProfile::DEFAULT,
        }
    }
}

impl HierarchicalQuadkeyFormatter {
    /// Creates a formatter clamping to `[zoom_floor, zoom_ceil]` with the
    /// default profile.
    pub fn new(zoom_floor: u8, zoom_ceil: u8) -> Result<Self, TileSourceError> {
        Self::with_profile(zoom_floor, zoom_ceil, QuadkeyProfile::DEFAULT)
    }

    /// Creates a formatter with an alternate profile.
    ///
    /// # Errors
    ///
    /// Fails when the bounds are inverted or when the profile would move an
    /// adjusted zoom outside the 8-bit zoom field.
    pub fn with_profile(
        zoom_floor: u8,
        zoom_ceil: u8,
        profile: QuadkeyProfile,
    ) -> Result<Self, TileSourceError> {
        if zoom_floor > zoom_ceil {
            return Err(TileSourceError::invalid(format!(
                "hierarchical zoom floor {} is above ceiling {}",
                zoom_floor, zoom_ceil
            )));
        }
        let offset = profile.zoom_offset();
        let lowest = i32::from(zoom_floor) + offset;
        let highest = i32::from(zoom_ceil) + offset;
        if lowest < 0 || highest > i32::from(u8::MAX) {
            return Err(TileSourceError::invalid(format!(
                "profile offset {} moves zoom range [{}, {}] outside [0, {}]",
                offset,
                zoom_floor,
                zoom_ceil,
                u8::MAX
            )));
        }
        Ok(Self {
            zoom_floor,
            zoom_ceil,
            profile,
        })
    }

    pub fn zoom_floor(&self) -> u8 {
        self.zoom_floor
    }

    pub fn zoom_ceil(&self) -> u8 {
        self.zoom_ceil
    }

    pub fn profile(&self) -> QuadkeyProfile {
        self.profile
    }

    /// Clamps `zoom` to the formatter bounds and applies the profile offset.
    #[inline]
    pub fn adjusted_zoom(&self, zoom: u8) -> u8 {
        let clamped = zoom.clamp(self.zoom_floor, self.zoom_ceil);
        // Range checked in `with_profile`
        (i32::from(clamped) + self.profile.zoom_offset()) as u8
    }

    /// Returns true if the tile's column and row fit the packed id.
    ///
    /// Zoom clamping never rejects a tile: the packed id keeps the tile's own
    /// column and row.
    pub fn accepts(&self, tile: &TileCoord) -> bool {
        tile.col <= MAX_PACKED_COORD && tile.row <= MAX_PACKED_COORD
    }

    /// Resolves the directory levels and packed id for a tile.
    pub fn address(&self, tile: &TileCoord) -> HierarchicalAddress {
        let zoom = self.adjusted_zoom(tile.zoom);
        let (col, row) = fit_to_packing(tile, zoom);
        let levels = level_count(zoom);

        let mut pairs = Vec::with_capacity(levels as usize);
        let mut consumed_col = 0u32;
        let mut consumed_row = 0u32;
        for i in 0..levels {
            let shift = BITS_PER_LEVEL * (levels - i);
            // Shifts past the coordinate width leave nothing: the level is 0
            let level_col = (col - consumed_col).checked_shr(shift).unwrap_or(0);
            let level_row = (row - consumed_row).checked_shr(shift).unwrap_or(0);
            assert!(
                i == 0 || (level_col < 16 && level_row < 16),
                "directory level {} of {} produced ({}, {}) for tile {}",
                i,
                levels,
                level_col,
                level_row,
                tile
            );
            consumed_col += level_col.checked_shl(shift).unwrap_or(0);
            consumed_row += level_row.checked_shl(shift).unwrap_or(0);
            pairs.push(LevelPair {
                col: level_col,
                row: level_row,
            });
        }

        HierarchicalAddress {
            zoom,
            levels: pairs,
            id: PackedTileId::pack_masked(col, row, zoom),
        }
    }
}

impl TileAddressFormatter for HierarchicalQuadkeyFormatter {
    fn format(&self, config: &TileSourceConfig, tile: &TileCoord) -> String {
        let mut out = self.address(tile).to_string();
        out.push_str(config.template().suffix());
        out
    }
}

/// Keeps column and row inside the 20-bit fields of the packed id.
///
/// Out-of-range input is a caller bug: debug builds panic, release builds
/// clamp and log.
fn fit_to_packing(tile: &TileCoord, zoom: u8) -> (u32, u32) {
    let limit = MAX_PACKED_COORD;

    if tile.col <= limit && tile.row <= limit {
        return (tile.col, tile.row);
    }

    debug_assert!(
        false,
        "tile {} out of range for packed id (max coordinate {})",
        tile, limit
    );
    warn!(
        tile = %tile,
        address_zoom = zoom,
        max_coordinate = limit,
        "Tile coordinate out of range, clamping"
    );
    (tile.col.min(limit), tile.row.min(limit))
}
