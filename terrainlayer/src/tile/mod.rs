//! Tile identity, fetching and landcover normalization.
//!
//! The [`TileStore`] is the only way tiles enter the system:
//!
//! ```text
//! TileKey ──▶ DiskCache ──hit──▶ RasterTile
//!                 │
//!                miss
//!                 ▼
//!           TileProvider ──▶ decode/validate ──▶ normalize (landcover)
//!                                                   │
//!                                     PNG ──▶ DiskCache (atomic) ──▶ RasterTile
//! ```

mod error;
mod landcover;
mod store;
mod types;

pub use error::FetchError;
pub use landcover::{normalize_landcover, normalize_pixel, LANDCOVER_SATURATION, LANDCOVER_VALUE};
pub use store::TileStore;
pub use types::{RasterTile, TileKey, TileLayer};
