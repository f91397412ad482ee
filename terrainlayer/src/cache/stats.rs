//! Tile store statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of tile store counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub disk_hits: u64,
    pub disk_misses: u64,
    pub downloads: u64,
    pub download_failures: u64,
    pub bytes_downloaded: u64,
    pub disk_writes: u64,
    pub disk_write_failures: u64,
}

impl CacheStats {
    /// Calculate disk cache hit rate (0.0 to 1.0).
    pub fn disk_hit_rate(&self) -> f64 {
        let total = self.disk_hits + self.disk_misses;
        if total == 0 {
            0.0
        } else {
            self.disk_hits as f64 / total as f64
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} hit_rate={:.1}% downloads={} failures={} downloaded={:.2} MB",
            self.disk_hits,
            self.disk_misses,
            self.disk_hit_rate() * 100.0,
            self.downloads,
            self.download_failures,
            self.bytes_downloaded as f64 / (1024.0 * 1024.0)
        )
    }
}

/// Lock-free counters shared by concurrent fetches.
#[derive(Debug, Default)]
pub struct CacheCounters {
    disk_hits: AtomicU64,
    disk_misses: AtomicU64,
    downloads: AtomicU64,
    download_failures: AtomicU64,
    bytes_downloaded: AtomicU64,
    disk_writes: AtomicU64,
    disk_write_failures: AtomicU64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_disk_hit(&self) {
        self.disk_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_disk_miss(&self) {
        self.disk_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_download(&self, bytes: u64) {
        self.downloads.fetch_add(1, Ordering::Relaxed);
        self.bytes_downloaded.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_download_failure(&self) {
        self.download_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_disk_write(&self) {
        self.disk_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_disk_write_failure(&self) {
        self.disk_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            disk_hits: self.disk_hits.load(Ordering::Relaxed),
            disk_misses: self.disk_misses.load(Ordering::Relaxed),
            downloads: self.downloads.load(Ordering::Relaxed),
            download_failures: self.download_failures.load(Ordering::Relaxed),
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
            disk_writes: self.disk_writes.load(Ordering::Relaxed),
            disk_write_failures: self.disk_write_failures.load(Ordering::Relaxed),
        }
    }
}
