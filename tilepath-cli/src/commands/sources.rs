//! Sources command - list the catalog.

use std::fmt;

use serde::Serialize;
use tilepath::config::SourceCatalog;
use tilepath::source::TileSourceConfig;

/// One catalog entry, without the credential value.
#[derive(Debug, Serialize)]
pub struct SourceSummary {
    pub name: String,
    pub base_url: String,
    pub tile_path: String,
    pub zoom_min: u8,
    pub zoom_max: u8,
    pub formatter: &'static str,
    pub projection: &'static str,
    pub has_api_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_type: Option<String>,
}

impl SourceSummary {
    fn new(name: &str, config: &TileSourceConfig) -> Self {
        Self {
            name: name.to_string(),
            base_url: config.base_url().to_string(),
            tile_path: config.template().as_str().to_string(),
            zoom_min: config.zoom_min(),
            zoom_max: config.zoom_max(),
            formatter: config.formatter().name(),
            projection: config.projection().name(),
            has_api_key: config.api_key().is_some(),
            map_type: config.map_type().map(str::to_string),
        }
    }
}

/// The whole catalog, sorted by name.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SourceList(pub Vec<SourceSummary>);

impl fmt::Display for SourceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.0.iter().map(|s| s.name.len()).max().unwrap_or(0);
        for (i, source) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:width$}  z{:>2}-{:<2}  {:<12}  {}{}",
                source.name,
                source.zoom_min,
                source.zoom_max,
                source.formatter,
                source.base_url,
                source.tile_path,
                width = width
            )?;
            if source.has_api_key {
                f.write_str("  (key set)")?;
            }
        }
        Ok(())
    }
}

pub fn run(catalog: &SourceCatalog) -> SourceList {
    SourceList(
        catalog
            .iter()
            .map(|(name, config)| SourceSummary::new(name, config))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_preset() {
        let catalog = SourceCatalog::presets().unwrap();
        let list = run(&catalog);
        assert_eq!(list.0.len(), catalog.len());
        assert_eq!(list.to_string().lines().count(), catalog.len());
    }

    #[test]
    fn test_summary_fields() {
        let catalog = SourceCatalog::presets().unwrap();
        let list = run(&catalog);
        let siwei = list.0.iter().find(|s| s.name == "siweidg-tran").unwrap();
        assert_eq!(siwei.formatter, "hierarchical");
        assert_eq!(siwei.map_type.as_deref(), Some("tran"));
        assert!(!siwei.has_api_key);
    }

    #[test]
    fn test_json_never_contains_key_value() {
        let mut catalog = SourceCatalog::presets().unwrap();
        let keyed = catalog
            .get("openstreetmap")
            .unwrap()
            .with_api_key(Some("topsecret".to_string()));
        catalog.insert(keyed);

        let json = serde_json::to_string(&run(&catalog)).unwrap();
        assert!(!json.contains("topsecret"));
        assert!(json.contains("\"has_api_key\":true"));
    }
}
