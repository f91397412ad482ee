//! Cache-first tile store.

use crate::cache::{CacheCounters, CacheStats, DiskCache};
use crate::provider::TileProvider;
use crate::tile::landcover::normalize_landcover;
use crate::tile::{FetchError, RasterTile, TileKey, TileLayer};
use image::{ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fetches tiles through the disk cache.
///
/// A hit is served from disk. A miss is downloaded through the provider,
/// validated, normalized (landcover only), re-encoded as PNG and written to
/// the cache before it is returned. Responses that do not decode are never
/// cached.
///
/// The store is `Sync`; concurrent fetches of the same key race harmlessly
/// because cache writes are atomic.
pub struct TileStore {
    cache: DiskCache,
    provider: Arc<dyn TileProvider>,
    counters: CacheCounters,
}

impl TileStore {
    pub fn new(cache: DiskCache, provider: Arc<dyn TileProvider>) -> Self {
        Self {
            cache,
            provider,
            counters: CacheCounters::new(),
        }
    }

    pub fn cache(&self) -> &DiskCache {
        &self.cache
    }

    pub fn cache_dir(&self) -> &Path {
        self.cache.cache_dir()
    }

    /// Snapshot of hit/miss/download counters.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    /// Returns the tile for `key`, from cache unless `force_refresh`.
    pub fn fetch(&self, key: &TileKey, force_refresh: bool) -> Result<RasterTile, FetchError> {
        if !force_refresh {
            if let Some(tile) = self.load_cached(key)? {
                self.counters.record_disk_hit();
                return Ok(tile);
            }
        }
        self.counters.record_disk_miss();

        let bytes = self
            .provider
            .download_tile(key.layer, &key.tile())
            .map_err(|source| {
                self.counters.record_download_failure();
                FetchError::Network {
                    key: *key,
                    source,
                }
            })?;
        self.counters.record_download(bytes.len() as u64);

        let mut image = decode_image(key, &bytes)?;
        if key.layer == TileLayer::Landcover {
            normalize_landcover(&mut image);
        }

        let encoded = encode_png(key, &image)?;
        if let Err(source) = self.cache.put(key, &encoded) {
            self.counters.record_disk_write_failure();
            return Err(FetchError::Io { key: *key, source });
        }
        self.counters.record_disk_write();

        info!(
            key = %key,
            provider = self.provider.name(),
            width = image.width(),
            height = image.height(),
            bytes = bytes.len(),
            "Tile downloaded"
        );
        Ok(RasterTile::new(*key, image))
    }

    /// Loads a cached tile. Unreadable images are dropped and reported as a
    /// miss so the next fetch replaces them.
    fn load_cached(&self, key: &TileKey) -> Result<Option<RasterTile>, FetchError> {
        let data = match self.cache.get(key) {
            Ok(Some(data)) => data,
            Ok(None) => return Ok(None),
            Err(source) => return Err(FetchError::Io { key: *key, source }),
        };

        match decode_image(key, &data) {
            Ok(image) => {
                debug!(key = %key, "Tile cache hit");
                Ok(Some(RasterTile::new(*key, image)))
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding corrupt cached tile");
                if let Err(e) = self.cache.remove(key) {
                    warn!(key = %key, error = %e, "Failed to remove corrupt cached tile");
                }
                Ok(None)
            }
        }
    }
}

/// Decodes with format sniffing and rejects empty images.
fn decode_image(key: &TileKey, data: &[u8]) -> Result<RgbImage, FetchError> {
    let malformed = |reason: String| FetchError::MalformedImage { key: *key, reason };

    let image = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| malformed(format!("format error: {}", e)))?
        .decode()
        .map_err(|e| malformed(format!("decode error: {}", e)))?
        .to_rgb8();

    if image.width() == 0 || image.height() == 0 {
        return Err(malformed("empty image".to_string()));
    }
    Ok(image)
}

fn encode_png(key: &TileKey, image: &RgbImage) -> Result<Vec<u8>, FetchError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| FetchError::MalformedImage {
            key: *key,
            reason: format!("encode error: {}", e),
        })?;
    Ok(buffer.into_inner())
}
