//! Well-known tile sources.
//!
//! Check each service's terms of use before fetching from it. The Mapilion
//! sources need an API key.

use std::fmt;
use std::str::FromStr;

use super::{TileSourceBuilder, TileSourceError};
use crate::address::{AddressFormatter, HierarchicalQuadkeyFormatter};

/// Template shared by the standard XYZ servers.
const PNG_TEMPLATE: &str = "/{Z}/{X}/{Y}.png";
const JPG_TEMPLATE: &str = "/{Z}/{X}/{Y}.jpg";

/// Built-in tile sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    OpenStreetMap,
    StamenToner,
    StamenWatercolor,
    NaturalEarthLandcover,
    HikeBike,
    HikeBikeHillshade,
    MapilionHillshadeV1,
    MapilionHillshadeV2,
    SiweidgVect,
    SiweidgImage,
    SiweidgTran,
}

impl Preset {
    pub const ALL: [Preset; 11] = [
        Preset::OpenStreetMap,
        Preset::StamenToner,
        Preset::StamenWatercolor,
        Preset::NaturalEarthLandcover,
        Preset::HikeBike,
        Preset::HikeBikeHillshade,
        Preset::MapilionHillshadeV1,
        Preset::MapilionHillshadeV2,
        Preset::SiweidgVect,
        Preset::SiweidgImage,
        Preset::SiweidgTran,
    ];

    /// Catalog name, also accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Preset::OpenStreetMap => "openstreetmap",
            Preset::StamenToner => "stamen-toner",
            Preset::StamenWatercolor => "stamen-watercolor",
            Preset::NaturalEarthLandcover => "ne-landcover",
            Preset::HikeBike => "hikebike",
            Preset::HikeBikeHillshade => "hikebike-hillshade",
            Preset::MapilionHillshadeV1 => "mapilion-hillshade-v1",
            Preset::MapilionHillshadeV2 => "mapilion-hillshade-v2",
            Preset::SiweidgVect => "siweidg-vect",
            Preset::SiweidgImage => "siweidg-image",
            Preset::SiweidgTran => "siweidg-tran",
        }
    }

    /// Whether the service rejects requests without an API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(
            self,
            Preset::MapilionHillshadeV1 | Preset::MapilionHillshadeV2
        )
    }

    /// A builder pre-filled with this source's settings.
    ///
    /// Callers can override any setting (typically the API key) before
    /// building.
    pub fn builder(&self) -> TileSourceBuilder {
        let builder = match self {
            Preset::OpenStreetMap => {
                xyz("https://tile.openstreetmap.org", PNG_TEMPLATE).zoom_max(18)
            }
            Preset::StamenToner => {
                xyz("https://stamen-tiles.a.ssl.fastly.net/toner", PNG_TEMPLATE)
                    .zoom_max(18)
            }
            Preset::StamenWatercolor => xyz(
                "https://stamen-tiles.a.ssl.fastly.net/watercolor",
                JPG_TEMPLATE,
            )
            .zoom_max(18),
            Preset::NaturalEarthLandcover => {
                xyz("http://opensciencemap.org/tiles/ne", PNG_TEMPLATE)
                    .zoom_max(8)
            }
            Preset::HikeBike => {
                xyz("https://tiles.wmflabs.org/hikebike", PNG_TEMPLATE)
                    .zoom_max(17)
            }
            Preset::HikeBikeHillshade => {
                xyz("https://tiles.wmflabs.org/hillshading", PNG_TEMPLATE)
                    .zoom_max(14)
            }
            Preset::MapilionHillshadeV1 => {
                xyz("https://tiles.mapilion.com/hillshades/v1", PNG_TEMPLATE)
                    .zoom_min(1)
                    .zoom_max(12)
            }
            Preset::MapilionHillshadeV2 => {
                xyz("https://tiles.mapilion.com/hillshades/v2", PNG_TEMPLATE)
                    .zoom_max(12)
            }
            Preset::SiweidgVect => siweidg("http://wvs.spaceview.com/", PNG_TEMPLATE, "vect"),
            Preset::SiweidgImage => siweidg("http://wis.spaceview.com/", JPG_TEMPLATE, "image"),
            Preset::SiweidgTran => siweidg("http://wts.spaceview.com/", PNG_TEMPLATE, "tran"),
        };
        builder.name(self.name())
    }
}

/// Public servers publish from the world tile down.
fn xyz(url: &str, template: &str) -> TileSourceBuilder {
    TileSourceBuilder::new(url, template).zoom_min(0)
}

/// SiWei servers lay tiles out hierarchically; the template only supplies
/// the file extension.
fn siweidg(url: &str, template: &str, map_type: &str) -> TileSourceBuilder {
    xyz(url, template)
        .zoom_max(18)
        .map_type(map_type)
        .formatter(AddressFormatter::HierarchicalQuadkey(
            HierarchicalQuadkeyFormatter::default(),
        ))
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = TileSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| TileSourceError::invalid(format!("unknown preset source '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;

    #[test]
    fn test_all_presets_build() {
        for preset in Preset::ALL {
            let config = preset
                .builder()
                .build()
                .unwrap_or_else(|e| panic!("{} failed to build: {}", preset, e));
            assert_eq!(config.name(), Some(preset.name()));
        }
    }

    #[test]
    fn test_names_are_unique_and_parse() {
        let mut names = std::collections::HashSet::new();
        for preset in Preset::ALL {
            assert!(names.insert(preset.name()));
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("OpenStreetMap".parse::<Preset>().unwrap(), Preset::OpenStreetMap);
        assert!("nonexistent".parse::<Preset>().is_err());
    }

    #[test]
    fn test_openstreetmap_url() {
        let config = Preset::OpenStreetMap.builder().build().unwrap();
        assert_eq!(
            config.tile_url(&TileCoord::new(19295, 24640, 16)),
            "https://tile.openstreetmap.org/16/19295/24640.png"
        );
        assert_eq!(config.zoom_min(), 0);
        assert_eq!(config.zoom_max(), 18);
    }

    #[test]
    fn test_watercolor_is_jpeg() {
        let config = Preset::StamenWatercolor.builder().build().unwrap();
        assert!(config.tile_url(&TileCoord::new(1, 1, 2)).ends_with("/2/1/1.jpg"));
    }

    #[test]
    fn test_mapilion_with_key() {
        assert!(Preset::MapilionHillshadeV1.requires_api_key());
        assert!(!Preset::OpenStreetMap.requires_api_key());

        let config = Preset::MapilionHillshadeV1
            .builder()
            .api_key("abc")
            .build()
            .unwrap();
        assert_eq!(config.zoom_min(), 1);
        assert_eq!(
            config.tile_url(&TileCoord::new(3, 4, 5)),
            "https://tiles.mapilion.com/hillshades/v1/5/3/4.png?key=abc"
        );
    }

    #[test]
    fn test_siweidg_uses_hierarchical_layout() {
        let config = Preset::SiweidgImage.builder().build().unwrap();
        assert_eq!(config.map_type(), Some("image"));
        assert_eq!(config.formatter().name(), "hierarchical");

        let url = config.tile_url(&TileCoord::new(48, 192, 8));
        assert_eq!(url, "http://wis.spaceview.com/8/0000/0312/8796294348848.jpg");
    }
}
