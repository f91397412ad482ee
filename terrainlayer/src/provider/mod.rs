//! Terrain tile provider abstraction
//!
//! This module provides the HTTP client seam and the [`TileProvider`] trait
//! used by the tile store to download elevation and landcover tiles.

mod http;
mod tileserver;
mod types;

pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use tileserver::HttpTileProvider;
pub use types::{ProviderError, TileEndpoint, TileProvider, TileServers};

#[cfg(test)]
pub use http::tests::MockHttpClient;
