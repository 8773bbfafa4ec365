//! Tile address formatting.
//!
//! A formatter turns a tile coordinate into the path fragment appended to a
//! source's base URL. Formatters are pure: they never fail, never allocate
//! beyond the returned string, and may be shared freely across threads.
//!
//! # Strategies
//!
//! - [`TemplateFormatter`]: substitutes `{X}`, `{Y}`, `{Z}` in the source's
//!   path template (`/{Z}/{X}/{Y}.png` gives `/3/5/9.png`).
//! - [`HierarchicalQuadkeyFormatter`]: nested directories plus a packed
//!   numeric id (`8/0000/0312/8796294348848.png`).
//! - [`AddressFormatter::custom`]: any closure.
//!
//! ```
//! use tilepath::address::{AddressFormatter, HierarchicalQuadkeyFormatter};
//! use tilepath::coord::TileCoord;
//! use tilepath::source::TileSourceBuilder;
//!
//! let source = TileSourceBuilder::new("http://tiles.example.com/", "/{Z}/{X}/{Y}.png")
//!     .formatter(AddressFormatter::HierarchicalQuadkey(
//!         HierarchicalQuadkeyFormatter::new(0, 18).unwrap(),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let url = source.tile_url(&TileCoord::new(48, 192, 8));
//! assert_eq!(url, "http://tiles.example.com/8/0000/0312/8796294348848.png");
//! ```

mod hierarchical;
mod projection;
mod template;

pub use hierarchical::{
    level_count, HierarchicalAddress, HierarchicalQuadkeyFormatter, LevelPair, QuadkeyProfile,
};
pub use projection::{AddressProjection, TmsProjection, XyzProjection};
pub use template::{TemplateFormatter, TemplateSegment, TileTemplate};

use std::fmt;
use std::sync::Arc;

use crate::coord::TileCoord;
use crate::source::TileSourceConfig;

/// Strategy turning a tile into the address fragment for a source.
pub trait TileAddressFormatter: Send + Sync {
    /// Formats `tile` for `config`. Total over well-formed input.
    fn format(&self, config: &TileSourceConfig, tile: &TileCoord) -> String;
}

/// Signature of a caller-supplied formatter.
pub type FormatFn = dyn Fn(&TileSourceConfig, &TileCoord) -> String + Send + Sync;

/// The formatter a tile source is configured with.
#[derive(Clone, Default)]
pub enum AddressFormatter {
    /// Placeholder substitution (the default).
    #[default]
    Template,
    /// Nested directories and packed id.
    HierarchicalQuadkey(HierarchicalQuadkeyFormatter),
    /// Caller-supplied closure.
    Custom(Arc<FormatFn>),
}

impl AddressFormatter {
    /// Wraps a closure as a formatter.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&TileSourceConfig, &TileCoord) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Short name used in configuration files and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::HierarchicalQuadkey(_) => "hierarchical",
            Self::Custom(_) => "custom",
        }
    }
}

impl TileAddressFormatter for AddressFormatter {
    fn format(&self, config: &TileSourceConfig, tile: &TileCoord) -> String {
        match self {
            Self::Template => TemplateFormatter.format(config, tile),
            Self::HierarchicalQuadkey(formatter) => formatter.format(config, tile),
            Self::Custom(f) => f(config, tile),
        }
    }
}

impl fmt::Debug for AddressFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => f.write_str("Template"),
            Self::HierarchicalQuadkey(inner) => {
                f.debug_tuple("HierarchicalQuadkey").field(inner).finish()
            }
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<HierarchicalQuadkeyFormatter> for AddressFormatter {
    fn from(formatter: HierarchicalQuadkeyFormatter) -> Self {
        Self::HierarchicalQuadkey(formatter)
    }
}
