//! Source catalog file handling for ~/.tilepath/sources.ini.
//!
//! The catalog always starts from the built-in presets. Each INI section
//! either overrides a preset of the same name or declares a new source.
//! Key names are mapped in [`super::parser`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::source::{Preset, TileSourceConfig, TileSourceError};

/// Catalog file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read catalog file
    #[error("Failed to read source catalog: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// A section's settings were rejected when building the source
    #[error("Invalid source [{section}]: {source}")]
    Source {
        section: String,
        #[source]
        source: TileSourceError,
    },
}

/// Named tile sources, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    sources: BTreeMap<String, TileSourceConfig>,
}

impl SourceCatalog {
    /// Catalog holding only the built-in presets.
    pub fn presets() -> Result<Self, ConfigFileError> {
        let mut sources = BTreeMap::new();
        for preset in Preset::ALL {
            let config = preset
                .builder()
                .build()
                .map_err(|source| ConfigFileError::Source {
                    section: preset.name().to_string(),
                    source,
                })?;
            sources.insert(preset.name().to_string(), config);
        }
        Ok(Self { sources })
    }

    /// Load the catalog from the default path (~/.tilepath/sources.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load the catalog from a specific path.
    ///
    /// If the file doesn't exist, returns the presets.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            debug!(path = %path.display(), "No source catalog file, using presets");
            return Self::presets();
        }

        let ini = Ini::load_from_file(path)?;
        let catalog = Self::from_ini(&ini)?;
        debug!(
            path = %path.display(),
            sources = catalog.len(),
            "Source catalog loaded"
        );
        Ok(catalog)
    }

    /// Presets overlaid with the sections of an already parsed INI document.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut catalog = Self::presets()?;
        for config in super::parser::parse_sources(ini)? {
            catalog.insert(config);
        }
        Ok(catalog)
    }

    /// Adds or replaces a source. Unnamed configs are stored as `unnamed`.
    pub fn insert(&mut self, config: TileSourceConfig) {
        let name = config.name().unwrap_or("unnamed").to_string();
        self.sources.insert(name, config);
    }

    /// Looks a source up by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&TileSourceConfig> {
        self.sources.get(name).or_else(|| {
            self.sources
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, config)| config)
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TileSourceConfig)> {
        self.sources.iter().map(|(name, config)| (name.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Get the path to the config directory (~/.tilepath).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tilepath")
}

/// Get the path to the catalog file (~/.tilepath/sources.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("sources.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use std::fs;

    #[test]
    fn test_presets_catalog() {
        let catalog = SourceCatalog::presets().unwrap();
        assert_eq!(catalog.len(), Preset::ALL.len());
        for preset in Preset::ALL {
            assert!(catalog.get(preset.name()).is_some(), "{} missing", preset);
        }
    }

    #[test]
    fn test_load_nonexistent_returns_presets() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.ini");

        let catalog = SourceCatalog::load_from(&path).unwrap();
        assert_eq!(catalog.len(), Preset::ALL.len());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("sources.ini");
        fs::write(
            &path,
            "[openstreetmap]\n\
             api_key = abc\n\
             \n\
             [local]\n\
             url = http://localhost:8080/tiles\n\
             tile_path = /{Z}/{X}/{Y}.webp\n\
             zoom_min = 0\n\
             zoom_max = 14\n",
        )
        .unwrap();

        let catalog = SourceCatalog::load_from(&path).unwrap();
        assert_eq!(catalog.len(), Preset::ALL.len() + 1);

        let osm = catalog.get("openstreetmap").unwrap();
        assert_eq!(
            osm.tile_url(&TileCoord::new(1, 2, 3)),
            "https://tile.openstreetmap.org/3/1/2.png?key=abc"
        );

        let local = catalog.get("local").unwrap();
        assert_eq!(local.zoom_max(), 14);
        assert_eq!(
            local.tile_url(&TileCoord::new(1, 2, 3)),
            "http://localhost:8080/tiles/3/1/2.webp"
        );
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("sources.ini");
        fs::write(&path, "[unterminated").unwrap();

        let result = SourceCatalog::load_from(&path);
        assert!(matches!(result, Err(ConfigFileError::ReadError(_))));
    }

    #[test]
    fn test_get_ignores_case() {
        let catalog = SourceCatalog::presets().unwrap();
        assert!(catalog.get("OpenStreetMap").is_some());
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn test_names_sorted() {
        let catalog = SourceCatalog::presets().unwrap();
        let names: Vec<&str> = catalog.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with(".tilepath/sources.ini"));
    }
}
