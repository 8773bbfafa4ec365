//! Immutable tile source configuration and address assembly.

use std::fmt;
use std::sync::Arc;

use super::TileSourceError;
use crate::address::{AddressFormatter, AddressProjection, TileAddressFormatter, TileTemplate};
use crate::coord::TileCoord;

/// Everything needed to turn a tile into a remote address.
///
/// Built by [`TileSourceBuilder`](super::TileSourceBuilder) and never mutated
/// afterwards, so a config can be shared across threads without locking.
/// Changing a setting (for example rotating the API key) produces a new
/// config; see [`SharedTileSource`](super::SharedTileSource) for swapping one
/// in under concurrent readers.
#[derive(Clone)]
pub struct TileSourceConfig {
    pub(super) name: Option<String>,
    pub(super) base_url: String,
    pub(super) template: TileTemplate,
    pub(super) zoom_min: u8,
    pub(super) zoom_max: u8,
    pub(super) key_name: String,
    pub(super) api_key: Option<String>,
    pub(super) formatter: AddressFormatter,
    pub(super) projection: Arc<dyn AddressProjection>,
    pub(super) map_type: Option<String>,
}

impl TileSourceConfig {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Base URL exactly as configured.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn template(&self) -> &TileTemplate {
        &self.template
    }

    pub fn zoom_min(&self) -> u8 {
        self.zoom_min
    }

    pub fn zoom_max(&self) -> u8 {
        self.zoom_max
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn formatter(&self) -> &AddressFormatter {
        &self.formatter
    }

    pub fn projection(&self) -> &dyn AddressProjection {
        self.projection.as_ref()
    }

    pub fn map_type(&self) -> Option<&str> {
        self.map_type.as_deref()
    }

    /// Checks if this source serves the given zoom level.
    pub fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.zoom_min && zoom <= self.zoom_max
    }

    /// Formatter output for `tile`, without base URL or credential.
    pub fn format_path(&self, tile: &TileCoord) -> String {
        self.formatter.format(self, tile)
    }

    /// Full resource address for `tile`.
    ///
    /// `base_url + path`, followed by `?<key_name>=<api_key>` when a key is
    /// configured. The caller is responsible for the zoom range; use
    /// [`try_tile_url`](Self::try_tile_url) to have it checked.
    pub fn tile_url(&self, tile: &TileCoord) -> String {
        let path = self.format_path(tile);
        let mut url = String::with_capacity(self.base_url.len() + path.len() + 32);
        url.push_str(&self.base_url);
        url.push_str(&path);
        if let Some(api_key) = &self.api_key {
            url.push('?');
            url.push_str(&self.key_name);
            url.push('=');
            url.push_str(api_key);
        }
        url
    }

    /// Like [`tile_url`](Self::tile_url), but rejects tiles this source
    /// cannot address.
    ///
    /// # Errors
    ///
    /// - [`TileSourceError::UnsupportedZoom`] if the zoom is outside
    ///   `[zoom_min, zoom_max]`.
    /// - [`TileSourceError::CoordinateOutOfRange`] if the column or row lies
    ///   outside the grid, or, for the hierarchical formatter, does not fit
    ///   the 20-bit fields of the packed id.
    pub fn try_tile_url(&self, tile: &TileCoord) -> Result<String, TileSourceError> {
        if !self.supports_zoom(tile.zoom) {
            return Err(TileSourceError::UnsupportedZoom(tile.zoom));
        }

        let addressable = match &self.formatter {
            AddressFormatter::HierarchicalQuadkey(formatter) => {
                tile.is_valid() && formatter.accepts(tile)
            }
            _ => tile.is_valid(),
        };
        if !addressable {
            return Err(TileSourceError::CoordinateOutOfRange {
                col: tile.col,
                row: tile.row,
                zoom: tile.zoom,
            });
        }

        Ok(self.tile_url(tile))
    }

    /// Returns a copy of this config with a different credential.
    pub fn with_api_key(&self, api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..self.clone()
        }
    }
}

impl fmt::Debug for TileSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileSourceConfig")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("template", &self.template.as_str())
            .field("zoom_min", &self.zoom_min)
            .field("zoom_max", &self.zoom_max)
            .field("key_name", &self.key_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("formatter", &self.formatter)
            .field("projection", &self.projection.name())
            .field("map_type", &self.map_type)
            .finish()
    }
}
