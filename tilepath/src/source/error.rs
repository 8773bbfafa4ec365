//! Tile source errors.

use thiserror::Error;

/// Errors raised while building a tile source or resolving a checked address.
///
/// Formatting itself never fails; these come from construction and from the
/// checked [`try_tile_url`](super::TileSourceConfig::try_tile_url) path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileSourceError {
    /// Missing or malformed template, bad base URL, inverted zoom range.
    #[error("Invalid tile source configuration: {0}")]
    InvalidConfiguration(String),

    /// Column or row outside the grid at the tile's zoom level.
    #[error("Tile ({col}, {row}) is outside the grid at zoom {zoom}")]
    CoordinateOutOfRange { col: u32, row: u32, zoom: u8 },

    /// Zoom level outside the source's supported range.
    #[error("Zoom level {0} not supported by tile source")]
    UnsupportedZoom(u8),
}

impl TileSourceError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TileSourceError::invalid("tile path template is empty");
        assert_eq!(
            err.to_string(),
            "Invalid tile source configuration: tile path template is empty"
        );

        let err = TileSourceError::CoordinateOutOfRange {
            col: 8,
            row: 0,
            zoom: 3,
        };
        assert_eq!(err.to_string(), "Tile (8, 0) is outside the grid at zoom 3");

        let err = TileSourceError::UnsupportedZoom(23);
        assert!(err.to_string().contains("23"));
    }
}
