//! TerrainLayer - streaming terrain tiles into a 3-D viewer
//!
//! Keeps a 3×3 neighborhood of web-mercator tiles around a moving viewpoint
//! loaded into a renderer: Terrarium-encoded elevation becomes a 16-bit
//! heightmap and landcover imagery becomes its color texture. Tiles are
//! cached on disk; mosaics are built on a background worker and handed to
//! the renderer on the host's own thread.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use terrainlayer::cache::DiskCache;
//! use terrainlayer::coord::TileCoord;
//! use terrainlayer::mosaic::{MosaicBuilder, MosaicConfig};
//! use terrainlayer::provider::{HttpTileProvider, ReqwestClient, TileServers};
//! use terrainlayer::stream::{StreamConfig, TerrainSession};
//! use terrainlayer::tile::TileStore;
//!
//! let provider = HttpTileProvider::new(ReqwestClient::new()?, TileServers::default());
//! let store = TileStore::new(DiskCache::new(cache_dir)?, Arc::new(provider));
//! let builder = MosaicBuilder::new(Arc::new(store), MosaicConfig::default());
//!
//! let start = TileCoord::new(8529, 5843, 14)?;
//! let mut session = TerrainSession::start(Arc::new(builder), renderer, start, StreamConfig::default())?;
//! session.on_tick(&camera_position)?;
//! ```

pub mod cache;
pub mod config;
pub mod coord;
pub mod elevation;
pub mod logging;
pub mod mosaic;
pub mod provider;
pub mod stream;
pub mod tile;

/// Version of the TerrainLayer library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
