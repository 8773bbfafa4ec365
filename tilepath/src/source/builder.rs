//! Validating builder for [`TileSourceConfig`].

use std::sync::Arc;

use reqwest::Url;
use tracing::debug;

use super::{TileSourceConfig, TileSourceError};
use crate::address::{AddressFormatter, AddressProjection, TileTemplate, XyzProjection};
use crate::coord::{MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};

/// Query parameter name used for the credential when none is configured.
pub const DEFAULT_KEY_NAME: &str = "key";

/// Collects tile source settings and validates them in [`build`](Self::build).
///
/// Validation happens only here; the built config is immutable.
///
/// # Example
///
/// ```
/// use tilepath::source::TileSourceBuilder;
/// use tilepath::coord::TileCoord;
///
/// let source = TileSourceBuilder::new("http://x/", "{Z}/{X}/{Y}.png")
///     .api_key("abc")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     source.tile_url(&TileCoord::new(1, 2, 3)),
///     "http://x/3/1/2.png?key=abc"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct TileSourceBuilder {
    name: Option<String>,
    url: Option<String>,
    tile_path: Option<String>,
    zoom_min: u8,
    zoom_max: u8,
    key_name: String,
    api_key: Option<String>,
    formatter: AddressFormatter,
    projection: Arc<dyn AddressProjection>,
    map_type: Option<String>,
}

impl Default for TileSourceBuilder {
    fn default() -> Self {
        Self {
            name: None,
            url: None,
            tile_path: None,
            zoom_min: MIN_ZOOM_LEVEL,
            zoom_max: MAX_ZOOM_LEVEL,
            key_name: DEFAULT_KEY_NAME.to_string(),
            api_key: None,
            formatter: AddressFormatter::default(),
            projection: Arc::new(XyzProjection),
            map_type: None,
        }
    }
}

impl TileSourceBuilder {
    /// Starts a builder with a base URL and path template.
    pub fn new(url: impl Into<String>, tile_path: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            tile_path: Some(tile_path.into()),
            ..Self::default()
        }
    }

    /// Name used to identify the source in catalogs and logs.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn tile_path(mut self, tile_path: impl Into<String>) -> Self {
        self.tile_path = Some(tile_path.into());
        self
    }

    pub fn zoom_min(mut self, zoom_min: u8) -> Self {
        self.zoom_min = zoom_min;
        self
    }

    pub fn zoom_max(mut self, zoom_max: u8) -> Self {
        self.zoom_max = zoom_max;
        self
    }

    /// Query parameter name for the credential (defaults to `key`).
    pub fn key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Clears any previously set credential.
    pub fn no_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn formatter(mut self, formatter: AddressFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn projection<P: AddressProjection + 'static>(mut self, projection: P) -> Self {
        self.projection = Arc::new(projection);
        self
    }

    /// Free-form label for the kind of map served (`vect`, `image`, ...).
    pub fn map_type(mut self, map_type: impl Into<String>) -> Self {
        self.map_type = Some(map_type.into());
        self
    }

    /// Validates the settings and produces an immutable config.
    ///
    /// # Errors
    ///
    /// [`TileSourceError::InvalidConfiguration`] when the URL is missing or is
    /// not an absolute URL, the template is missing or malformed, the zoom
    /// range is inverted, or the credential parameter name is empty.
    pub fn build(self) -> Result<TileSourceConfig, TileSourceError> {
        let base_url = self
            .url
            .ok_or_else(|| TileSourceError::invalid("base URL is required"))?;
        validate_base_url(&base_url)?;

        let tile_path = self
            .tile_path
            .ok_or_else(|| TileSourceError::invalid("tile path template is required"))?;
        let template = TileTemplate::parse(&tile_path)?;

        if self.zoom_min > self.zoom_max {
            return Err(TileSourceError::invalid(format!(
                "zoom_min {} is above zoom_max {}",
                self.zoom_min, self.zoom_max
            )));
        }

        if self.key_name.is_empty() {
            return Err(TileSourceError::invalid("credential parameter name is empty"));
        }

        debug!(
            source = self.name.as_deref().unwrap_or("unnamed"),
            base_url = %base_url,
            template = %template,
            formatter = self.formatter.name(),
            projection = self.projection.name(),
            zoom_min = self.zoom_min,
            zoom_max = self.zoom_max,
            "Tile source configured"
        );

        Ok(TileSourceConfig {
            name: self.name,
            base_url,
            template,
            zoom_min: self.zoom_min,
            zoom_max: self.zoom_max,
            key_name: self.key_name,
            api_key: self.api_key,
            formatter: self.formatter,
            projection: self.projection,
            map_type: self.map_type,
        })
    }
}

/// The base URL is kept exactly as written; parsing only checks it.
fn validate_base_url(base_url: &str) -> Result<(), TileSourceError> {
    if base_url.trim() != base_url {
        return Err(TileSourceError::invalid(format!(
            "base URL '{}' has surrounding whitespace",
            base_url
        )));
    }

    let parsed = Url::parse(base_url).map_err(|e| {
        TileSourceError::invalid(format!("malformed base URL '{}': {}", base_url, e))
    })?;

    if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
        return Err(TileSourceError::invalid(format!(
            "base URL '{}' is not an absolute URL with a host",
            base_url
        )));
    }

    Ok(())
}
