//! INI parsing logic for converting `Ini` sections into tile sources.
//!
//! This is the single place where catalog key names are mapped to builder
//! settings.

use ini::{Ini, Properties};
use tracing::warn;

use super::file::ConfigFileError;
use crate::address::{
    AddressFormatter, HierarchicalQuadkeyFormatter, TmsProjection, XyzProjection,
};
use crate::coord::{MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};
use crate::source::{Preset, TileSourceBuilder, TileSourceConfig};

/// Keys recognised in a source section.
const KNOWN_KEYS: [&str; 11] = [
    "url",
    "tile_path",
    "zoom_min",
    "zoom_max",
    "formatter",
    "formatter_zoom_min",
    "formatter_zoom_max",
    "projection",
    "key_name",
    "api_key",
    "map_type",
];

/// Build one source per named section.
///
/// A section whose name matches a preset starts from that preset; any other
/// section must provide `url` and `tile_path`.
pub(super) fn parse_sources(ini: &Ini) -> Result<Vec<TileSourceConfig>, ConfigFileError> {
    let mut sources = Vec::new();

    for (section, props) in ini.iter() {
        let Some(section) = section else {
            for (key, _) in props.iter() {
                warn!(key, "Ignoring catalog key outside any source section");
            }
            continue;
        };

        sources.push(parse_section(section.trim(), props)?);
    }

    Ok(sources)
}

fn parse_section(section: &str, props: &Properties) -> Result<TileSourceConfig, ConfigFileError> {
    for (key, _) in props.iter() {
        if !KNOWN_KEYS.contains(&key) {
            warn!(section, key, "Ignoring unknown catalog key");
        }
    }

    let (name, mut builder) = match section.parse::<Preset>() {
        Ok(preset) => (preset.name().to_string(), preset.builder()),
        Err(_) => {
            for key in ["url", "tile_path"] {
                if value(props, key).is_none() {
                    return Err(invalid(
                        section,
                        key,
                        "",
                        "required for sources that are not presets",
                    ));
                }
            }
            (section.to_string(), TileSourceBuilder::default().name(section))
        }
    };

    if let Some(v) = value(props, "url") {
        builder = builder.url(v);
    }
    if let Some(v) = value(props, "tile_path") {
        builder = builder.tile_path(v);
    }
    if let Some(v) = value(props, "zoom_min") {
        builder = builder.zoom_min(parse_zoom(section, "zoom_min", v)?);
    }
    if let Some(v) = value(props, "zoom_max") {
        builder = builder.zoom_max(parse_zoom(section, "zoom_max", v)?);
    }
    if let Some(formatter) = parse_formatter(section, props)? {
        builder = builder.formatter(formatter);
    }
    if let Some(v) = value(props, "projection") {
        builder = match v.to_lowercase().as_str() {
            "xyz" => builder.projection(XyzProjection),
            "tms" => builder.projection(TmsProjection),
            _ => {
                return Err(invalid(section, "projection", v, "must be 'xyz' or 'tms'"));
            }
        };
    }
    if let Some(v) = value(props, "key_name") {
        builder = builder.key_name(v);
    }
    // An empty api_key clears a preset's credential
    if let Some(v) = props.get("api_key") {
        let v = v.trim();
        builder = if v.is_empty() {
            builder.no_api_key()
        } else {
            builder.api_key(v)
        };
    }
    if let Some(v) = value(props, "map_type") {
        builder = builder.map_type(v);
    }

    builder
        .build()
        .map_err(|source| ConfigFileError::Source {
            section: name,
            source,
        })
}

/// The `formatter` key, plus the optional hierarchical zoom bounds.
///
/// Setting only the bounds implies the hierarchical formatter.
fn parse_formatter(
    section: &str,
    props: &Properties,
) -> Result<Option<AddressFormatter>, ConfigFileError> {
    let zoom_floor = value(props, "formatter_zoom_min")
        .map(|v| parse_zoom(section, "formatter_zoom_min", v))
        .transpose()?;
    let zoom_ceil = value(props, "formatter_zoom_max")
        .map(|v| parse_zoom(section, "formatter_zoom_max", v))
        .transpose()?;
    let has_bounds = zoom_floor.is_some() || zoom_ceil.is_some();

    let kind = match value(props, "formatter") {
        Some(v) => v.to_lowercase(),
        None if has_bounds => "hierarchical".to_string(),
        None => return Ok(None),
    };

    match kind.as_str() {
        "template" if has_bounds => Err(invalid(
            section,
            "formatter",
            &kind,
            "formatter_zoom_min/formatter_zoom_max only apply to 'hierarchical'",
        )),
        "template" => Ok(Some(AddressFormatter::Template)),
        "hierarchical" => {
            let floor = zoom_floor.unwrap_or(MIN_ZOOM_LEVEL);
            let ceil = zoom_ceil.unwrap_or(MAX_ZOOM_LEVEL);
            HierarchicalQuadkeyFormatter::new(floor, ceil)
                .map(|f| Some(AddressFormatter::from(f)))
                .map_err(|e| {
                    invalid(
                        section,
                        "formatter_zoom_min",
                        &floor.to_string(),
                        &e.to_string(),
                    )
                })
        }
        _ => Err(invalid(
            section,
            "formatter",
            &kind,
            "must be 'template' or 'hierarchical'",
        )),
    }
}

/// Trimmed, non-empty value of `key`.
fn value<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn parse_zoom(section: &str, key: &str, v: &str) -> Result<u8, ConfigFileError> {
    v.parse()
        .map_err(|_| invalid(section, key, v, "must be an integer between 0 and 255"))
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use crate::source::TileSourceError;

    fn parse(text: &str) -> Result<Vec<TileSourceConfig>, ConfigFileError> {
        let ini = Ini::load_from_str(text).unwrap();
        parse_sources(&ini)
    }

    fn parse_one(text: &str) -> TileSourceConfig {
        let mut sources = parse(text).unwrap();
        assert_eq!(sources.len(), 1);
        sources.remove(0)
    }

    fn assert_invalid_value(result: Result<Vec<TileSourceConfig>, ConfigFileError>, key: &str) {
        match result {
            Err(ConfigFileError::InvalidValue { key: k, .. }) => assert_eq!(k, key),
            other => panic!("expected InvalidValue for {}, got {:?}", key, other),
        }
    }

    #[test]
    fn test_new_source_all_keys() {
        let config = parse_one(
            "[mine]\n\
             url = http://tiles.example.com\n\
             tile_path = /{Z}/{X}/{Y}.png\n\
             zoom_min = 1\n\
             zoom_max = 16\n\
             formatter = template\n\
             projection = tms\n\
             key_name = token\n\
             api_key = s3cret\n\
             map_type = vect\n",
        );

        assert_eq!(config.name(), Some("mine"));
        assert_eq!(config.zoom_min(), 1);
        assert_eq!(config.zoom_max(), 16);
        assert_eq!(config.projection().name(), "tms");
        assert_eq!(config.map_type(), Some("vect"));
        assert_eq!(
            config.tile_url(&TileCoord::new(2, 1, 3)),
            "http://tiles.example.com/3/2/6.png?token=s3cret"
        );
    }

    #[test]
    fn test_preset_overlay_keeps_preset_settings() {
        let config = parse_one("[hikebike]\nzoom_max = 15\n");
        assert_eq!(config.name(), Some("hikebike"));
        assert_eq!(config.base_url(), "https://tiles.wmflabs.org/hikebike");
        assert_eq!(config.zoom_max(), 15);
    }

    #[test]
    fn test_preset_section_name_is_case_insensitive() {
        let config = parse_one("[OpenStreetMap]\napi_key = abc\n");
        assert_eq!(config.name(), Some("openstreetmap"));
        assert_eq!(config.api_key(), Some("abc"));
    }

    #[test]
    fn test_empty_api_key_clears_credential() {
        let config = parse_one("[x]\nurl = http://x/\ntile_path = {Z}\napi_key =\n");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_hierarchical_with_bounds() {
        let config = parse_one(
            "[quad]\n\
             url = http://q/\n\
             tile_path = /{Z}/{X}/{Y}.png\n\
             formatter = hierarchical\n\
             formatter_zoom_min = 3\n\
             formatter_zoom_max = 18\n",
        );
        match config.formatter() {
            AddressFormatter::HierarchicalQuadkey(f) => {
                assert_eq!(f.zoom_floor(), 3);
                assert_eq!(f.zoom_ceil(), 18);
            }
            other => panic!("expected hierarchical, got {:?}", other),
        }
    }

    #[test]
    fn test_bounds_imply_hierarchical() {
        let config = parse_one("[siweidg-vect]\nformatter_zoom_max = 16\n");
        match config.formatter() {
            AddressFormatter::HierarchicalQuadkey(f) => assert_eq!(f.zoom_ceil(), 16),
            other => panic!("expected hierarchical, got {:?}", other),
        }
    }

    #[test]
    fn test_bounds_with_template_rejected() {
        assert_invalid_value(
            parse("[x]\nurl = http://x/\ntile_path = {Z}\nformatter = template\nformatter_zoom_max = 5\n"),
            "formatter",
        );
    }

    #[test]
    fn test_inverted_formatter_bounds_rejected() {
        assert_invalid_value(
            parse("[x]\nurl = http://x/\ntile_path = {Z}\nformatter_zoom_min = 9\nformatter_zoom_max = 4\n"),
            "formatter_zoom_min",
        );
    }

    #[test]
    fn test_unknown_formatter() {
        assert_invalid_value(
            parse("[x]\nurl = http://x/\ntile_path = {Z}\nformatter = bing\n"),
            "formatter",
        );
    }

    #[test]
    fn test_unknown_projection() {
        assert_invalid_value(
            parse("[x]\nurl = http://x/\ntile_path = {Z}\nprojection = mercator\n"),
            "projection",
        );
    }

    #[test]
    fn test_bad_zoom() {
        assert_invalid_value(
            parse("[x]\nurl = http://x/\ntile_path = {Z}\nzoom_max = high\n"),
            "zoom_max",
        );
        assert_invalid_value(
            parse("[x]\nurl = http://x/\ntile_path = {Z}\nzoom_max = 300\n"),
            "zoom_max",
        );
    }

    #[test]
    fn test_new_source_requires_url_and_template() {
        assert_invalid_value(parse("[x]\ntile_path = {Z}\n"), "url");
        assert_invalid_value(parse("[x]\nurl = http://x/\n"), "tile_path");
    }

    #[test]
    fn test_builder_rejection_reports_section() {
        let result = parse("[broken]\nurl = not a url\ntile_path = {Z}\n");
        match result {
            Err(ConfigFileError::Source { section, source }) => {
                assert_eq!(section, "broken");
                assert!(matches!(source, TileSourceError::InvalidConfiguration(_)));
            }
            other => panic!("expected Source error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = parse_one("[x]\nurl = http://x/\ntile_path = {Z}\ncolour = blue\n");
        assert_eq!(config.name(), Some("x"));
    }

    #[test]
    fn test_keys_outside_sections_are_ignored() {
        let sources = parse("stray = 1\n[x]\nurl = http://x/\ntile_path = {Z}\n").unwrap();
        assert_eq!(sources.len(), 1);
    }
}
