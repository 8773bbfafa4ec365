//! Resolve commands - turn a tile into its remote address.
//!
//! `url` and `path` take a tile directly; `locate` starts from a
//! latitude/longitude. All three reject tiles the source cannot serve.

use std::fmt;

use clap::Args;
use serde::Serialize;
use tilepath::config::SourceCatalog;
use tilepath::coord::{to_tile_coords, TileCoord};
use tracing::debug;

use super::common::find_source;
use crate::error::CliError;

/// A tile on a named source.
#[derive(Debug, Clone, Args)]
pub struct TileArgs {
    /// Source name (see `tilepath sources`)
    pub source: String,
    /// Zoom level
    pub zoom: u8,
    /// Tile column (X)
    pub col: u32,
    /// Tile row (Y)
    pub row: u32,
}

impl TileArgs {
    fn tile(&self) -> TileCoord {
        TileCoord::new(self.col, self.row, self.zoom)
    }
}

/// Arguments for the locate command.
#[derive(Debug, Clone, Args)]
pub struct LocateArgs {
    /// Source name (see `tilepath sources`)
    pub source: String,
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
    /// Zoom level
    #[arg(long)]
    pub zoom: u8,
    /// API key to use instead of the configured one
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Result of a resolve command.
#[derive(Debug, Serialize)]
pub struct Resolved {
    pub source: String,
    pub tile: TileCoord,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_deref().unwrap_or(&self.path))
    }
}

/// Full address of a tile, credential included.
pub fn url(
    catalog: &SourceCatalog,
    args: &TileArgs,
    api_key: Option<String>,
) -> Result<Resolved, CliError> {
    resolve(catalog, &args.source, args.tile(), api_key, true)
}

/// Formatter output only, without base URL or credential.
pub fn path(catalog: &SourceCatalog, args: &TileArgs) -> Result<Resolved, CliError> {
    resolve(catalog, &args.source, args.tile(), None, false)
}

/// Full address of the tile containing a geographic position.
pub fn locate(catalog: &SourceCatalog, args: &LocateArgs) -> Result<Resolved, CliError> {
    let tile = to_tile_coords(args.lat, args.lon, args.zoom)?;
    debug!(lat = args.lat, lon = args.lon, tile = %tile, "Position located");
    resolve(catalog, &args.source, tile, args.api_key.clone(), true)
}

fn resolve(
    catalog: &SourceCatalog,
    source: &str,
    tile: TileCoord,
    api_key: Option<String>,
    with_url: bool,
) -> Result<Resolved, CliError> {
    let config = find_source(catalog, source, api_key)?;
    // Checked first so hierarchical sources never see out-of-range tiles
    let url = config.try_tile_url(&tile)?;

    Ok(Resolved {
        source: config.name().unwrap_or(source).to_string(),
        tile,
        path: config.format_path(&tile),
        url: with_url.then_some(url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepath::source::TileSourceError;

    fn tile_args(source: &str, zoom: u8, col: u32, row: u32) -> TileArgs {
        TileArgs {
            source: source.to_string(),
            zoom,
            col,
            row,
        }
    }

    #[test]
    fn test_url_for_preset() {
        let catalog = SourceCatalog::presets().unwrap();
        let resolved = url(&catalog, &tile_args("openstreetmap", 3, 5, 6), None).unwrap();
        assert_eq!(resolved.to_string(), "https://tile.openstreetmap.org/3/5/6.png");
        assert_eq!(resolved.path, "/3/5/6.png");
    }

    #[test]
    fn test_url_with_api_key() {
        let catalog = SourceCatalog::presets().unwrap();
        let args = tile_args("mapilion-hillshade-v1", 5, 3, 4);
        let resolved = url(&catalog, &args, Some("abc".to_string())).unwrap();
        assert_eq!(
            resolved.to_string(),
            "https://tiles.mapilion.com/hillshades/v1/5/3/4.png?key=abc"
        );
    }

    #[test]
    fn test_path_omits_url() {
        let catalog = SourceCatalog::presets().unwrap();
        let resolved = path(&catalog, &tile_args("siweidg-vect", 8, 48, 192)).unwrap();
        assert!(resolved.url.is_none());
        assert_eq!(resolved.to_string(), "8/0000/0312/8796294348848.png");
    }

    #[test]
    fn test_rejects_unsupported_zoom() {
        let catalog = SourceCatalog::presets().unwrap();
        let result = url(&catalog, &tile_args("ne-landcover", 9, 0, 0), None);
        assert!(matches!(
            result,
            Err(CliError::Address(TileSourceError::UnsupportedZoom(9)))
        ));
    }

    #[test]
    fn test_rejects_tile_outside_grid() {
        let catalog = SourceCatalog::presets().unwrap();
        let result = path(&catalog, &tile_args("siweidg-vect", 3, 8, 0));
        assert!(matches!(
            result,
            Err(CliError::Address(TileSourceError::CoordinateOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_locate_new_york() {
        let catalog = SourceCatalog::presets().unwrap();
        let args = LocateArgs {
            source: "openstreetmap".to_string(),
            lat: 40.7128,
            lon: -74.0060,
            zoom: 16,
            api_key: None,
        };
        let resolved = locate(&catalog, &args).unwrap();
        assert_eq!(resolved.tile, TileCoord::new(19295, 24640, 16));
        assert_eq!(
            resolved.to_string(),
            "https://tile.openstreetmap.org/16/19295/24640.png"
        );
    }

    #[test]
    fn test_locate_rejects_bad_latitude() {
        let catalog = SourceCatalog::presets().unwrap();
        let args = LocateArgs {
            source: "openstreetmap".to_string(),
            lat: 91.0,
            lon: 0.0,
            zoom: 4,
            api_key: None,
        };
        assert!(matches!(
            locate(&catalog, &args),
            Err(CliError::Coordinate(_))
        ));
    }

    #[test]
    fn test_json_shape() {
        let catalog = SourceCatalog::presets().unwrap();
        let resolved = url(&catalog, &tile_args("openstreetmap", 3, 5, 6), None).unwrap();
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["source"], "openstreetmap");
        assert_eq!(json["tile"]["col"], 5);
        assert_eq!(json["tile"]["row"], 6);
        assert_eq!(json["tile"]["zoom"], 3);
        assert_eq!(json["url"], "https://tile.openstreetmap.org/3/5/6.png");
    }
}
