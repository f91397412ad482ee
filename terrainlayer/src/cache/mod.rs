//! On-disk tile cache.
//!
//! Encoded tile images are stored under
//! `<cache_dir>/<layer>/<zoom>/<x>/<y>.png` and replaced atomically.

mod disk;
mod path;
mod stats;
mod types;

pub use disk::DiskCache;
pub use stats::{CacheCounters, CacheStats};
pub use types::CacheError;

// Re-export path utilities for convenience
pub use path::{cache_path, column_directory, layer_directory};
