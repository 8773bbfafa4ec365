//! Coordinate module
//!
//! Tile coordinates in a power-of-two pyramid, the packed numeric tile id,
//! and conversion from geographic coordinates for callers that start from a
//! latitude/longitude instead of a tile.

mod packed;
mod types;

pub use packed::{PackedTileId, COL_BITS, MAX_PACKED_COORD, ROW_BITS, ZOOM_BITS};
pub use types::{
    grid_size, CoordError, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM_LEVEL, MIN_LAT, MIN_LON,
    MIN_ZOOM_LEVEL,
};

use std::f64::consts::PI;

/// Highest zoom at which every tile coordinate still fits a `u32`.
const MAX_GEO_ZOOM: u8 = 31;

/// Converts geographic coordinates to tile coordinates.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 31)
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_GEO_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let max_index = n - 1.0;

    // lon = 180 lands exactly on the far edge; keep it in the last column
    let col = ((lon + 180.0) / 360.0 * n).min(max_index) as u32;

    let lat_rad = lat * PI / 180.0;
    let row = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n)
        .clamp(0.0, max_index) as u32;

    Ok(TileCoord { col, row, zoom })
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let lon = tile.col as f64 / n * 360.0 - 180.0;

    let y = tile.row as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}
