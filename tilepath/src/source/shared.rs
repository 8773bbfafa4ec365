//! A tile source whose configuration can be replaced while in use.
//!
//! Readers never see a config being edited: they clone the current
//! `Arc<TileSourceConfig>` and resolve the whole address from that snapshot.
//! Writers build a new config and swap the pointer.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::TileSourceConfig;
use crate::coord::TileCoord;

/// Tile source with a rotatable credential.
#[derive(Debug)]
pub struct SharedTileSource {
    current: RwLock<Arc<TileSourceConfig>>,
}

impl SharedTileSource {
    pub fn new(config: TileSourceConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The config in effect right now.
    pub fn snapshot(&self) -> Arc<TileSourceConfig> {
        Arc::clone(&self.current.read())
    }

    /// Resolves an address against a single snapshot.
    pub fn tile_url(&self, tile: &TileCoord) -> String {
        self.snapshot().tile_url(tile)
    }

    /// Replaces the credential; in-flight readers keep their snapshot.
    pub fn rotate_api_key(&self, api_key: Option<String>) {
        let mut current = self.current.write();
        let rotated = current.with_api_key(api_key);
        *current = Arc::new(rotated);
        info!(
            source = current.name().unwrap_or("unnamed"),
            has_key = current.api_key().is_some(),
            "Tile source credential rotated"
        );
    }

    /// Replaces the whole configuration.
    pub fn replace(&self, config: TileSourceConfig) {
        *self.current.write() = Arc::new(config);
    }
}

impl From<TileSourceConfig> for SharedTileSource {
    fn from(config: TileSourceConfig) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TileSourceBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn source() -> TileSourceConfig {
        TileSourceBuilder::new("http://x/", "{Z}/{X}/{Y}.png")
            .api_key("k0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_rotate_api_key() {
        let shared = SharedTileSource::new(source());
        let tile = TileCoord::new(1, 2, 3);
        assert_eq!(shared.tile_url(&tile), "http://x/3/1/2.png?key=k0");

        shared.rotate_api_key(Some("k1".to_string()));
        assert_eq!(shared.tile_url(&tile), "http://x/3/1/2.png?key=k1");

        shared.rotate_api_key(None);
        assert_eq!(shared.tile_url(&tile), "http://x/3/1/2.png");
    }

    #[test]
    fn test_snapshot_survives_rotation() {
        let shared = SharedTileSource::new(source());
        let before = shared.snapshot();
        shared.rotate_api_key(Some("k1".to_string()));

        assert_eq!(before.api_key(), Some("k0"));
        assert_eq!(shared.snapshot().api_key(), Some("k1"));
    }

    #[test]
    fn test_replace() {
        let shared = SharedTileSource::from(source());
        let other = TileSourceBuilder::new("https://y/", "{Z}.png").build().unwrap();
        shared.replace(other);
        assert_eq!(shared.tile_url(&TileCoord::new(0, 0, 4)), "https://y/4.png");
    }

    #[test]
    fn test_concurrent_rotation_never_tears() {
        let shared = SharedTileSource::new(source());
        let done = AtomicBool::new(false);

        thread::scope(|scope| {
            for reader in 0..4u32 {
                let shared = &shared;
                let done = &done;
                scope.spawn(move || {
                    let mut seen = 0u64;
                    while !done.load(Ordering::Acquire) || seen < 100 {
                        let tile = TileCoord::new(reader, 1, 3);
                        let url = shared.tile_url(&tile);
                        let prefix = format!("http://x/3/{}/1.png?key=k", reader);
                        let suffix = url
                            .strip_prefix(&prefix)
                            .unwrap_or_else(|| panic!("unexpected address {}", url));
                        assert!(
                            suffix.parse::<u32>().is_ok(),
                            "torn credential in {}",
                            url
                        );
                        seen += 1;
                    }
                });
            }

            for n in 1..=500u32 {
                shared.rotate_api_key(Some(format!("k{}", n)));
            }
            done.store(true, Ordering::Release);
        });

        assert_eq!(shared.snapshot().api_key(), Some("k500"));
    }
}
