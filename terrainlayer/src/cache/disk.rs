//! Disk cache with atomic writes.

use crate::cache::path::cache_path;
use crate::cache::types::CacheError;
use crate::tile::TileKey;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Distinguishes temp files written concurrently by one process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Disk cache for encoded tile images.
///
/// Holds no index. Every lookup goes to the filesystem, so the cache can be
/// shared between threads and processes. Writes land in a unique temp file
/// next to the target and are renamed into place, so readers see either no
/// file or a complete one.
#[derive(Debug, Clone)]
pub struct DiskCache {
    /// Cache directory root
    cache_dir: PathBuf,
}

impl DiskCache {
    /// Create a new disk cache rooted at `cache_dir`.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(cache_dir: PathBuf) -> Result<Self, CacheError> {
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    /// Cache directory root.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path a key is stored at.
    pub fn path_for(&self, key: &TileKey) -> PathBuf {
        cache_path(&self.cache_dir, key.layer, &key.tile())
    }

    /// Read a cached tile.
    ///
    /// Returns `Ok(None)` when the tile is not cached.
    pub fn get(&self, key: &TileKey) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(data) => {
                trace!(key = %key, bytes = data.len(), "Disk cache hit");
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Io(e)),
        }
    }

    /// Check if a key exists in the cache.
    pub fn contains(&self, key: &TileKey) -> bool {
        self.path_for(key).is_file()
    }

    /// Atomically write a tile to disk, creating parent directories.
    pub fn put(&self, key: &TileKey, data: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = temp_path_for(&path);
        if let Err(e) = fs::write(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            return Err(CacheError::Io(e));
        }
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(CacheError::Io(e));
        }

        debug!(key = %key, path = %path.display(), bytes = data.len(), "Tile cached");
        Ok(())
    }

    /// Remove a cached tile. Missing files are not an error.
    pub fn remove(&self, key: &TileKey) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Io(e)),
        }
    }
}

/// Unique sibling temp path: `<y>.png.<pid>.<n>.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = path
        .file_name()
        .map(|f| f.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.{}.tmp", std::process::id(), n));
    path.with_file_name(name)
}
