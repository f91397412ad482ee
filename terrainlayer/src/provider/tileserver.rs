//! XYZ tile server provider.
//!
//! Fetches terrain tiles from plain `{z}/{x}/{y}.png` tile servers, one
//! endpoint per layer.
//!
//! # URL Pattern
//!
//! `<base_url>/<layer_path>/{zoom}/{x}/{y}.png`
//!
//! - Elevation defaults to the public Terrarium bucket
//!   (`https://s3.amazonaws.com/elevation-tiles-prod/terrarium/...`)
//! - Landcover defaults to the terrain background style
//!   (`https://tiles.stadiamaps.com/tiles/stamen_terrain_background/...`)

use super::http::HttpClient;
use super::types::{ProviderError, TileProvider, TileServers};
use crate::coord::TileCoord;
use crate::tile::TileLayer;
use tracing::debug;

/// Tile provider backed by two XYZ tile servers.
///
/// # Example
///
/// ```ignore
/// use terrainlayer::provider::{HttpTileProvider, ReqwestClient, TileServers};
///
/// let client = ReqwestClient::new()?;
/// let provider = HttpTileProvider::new(client, TileServers::default());
/// ```
pub struct HttpTileProvider<C: HttpClient> {
    http_client: C,
    servers: TileServers,
}

impl<C: HttpClient> HttpTileProvider<C> {
    /// Creates a new provider.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client for making requests
    /// * `servers` - Endpoint for each layer
    pub fn new(http_client: C, servers: TileServers) -> Self {
        Self {
            http_client,
            servers,
        }
    }

    pub fn servers(&self) -> &TileServers {
        &self.servers
    }
}

impl<C: HttpClient> TileProvider for HttpTileProvider<C> {
    fn download_tile(&self, layer: TileLayer, tile: &TileCoord) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(tile.zoom) {
            return Err(ProviderError::UnsupportedZoom(tile.zoom));
        }

        let url = self.servers.endpoint(layer).tile_url(tile);
        debug!(layer = %layer, tile = %tile, url = %url, "Requesting tile");
        self.http_client.get(&url)
    }

    fn name(&self) -> &str {
        "XYZ tile server"
    }
}
