//! Provider types and traits

use crate::coord::TileCoord;
use crate::tile::TileLayer;
use std::fmt;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed
    HttpError(String),
    /// Zoom level not supported by this provider
    UnsupportedZoom(u8),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::UnsupportedZoom(zoom) => {
                write!(f, "Zoom level {} not supported by provider", zoom)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Where one layer's tiles are served from.
///
/// Tiles are requested as `<base_url>/<layer_path>/<zoom>/<x>/<y>.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileEndpoint {
    pub base_url: String,
    pub layer_path: String,
}

impl TileEndpoint {
    pub fn new(base_url: impl Into<String>, layer_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            layer_path: layer_path.into(),
        }
    }

    /// Builds the request URL for a tile.
    ///
    /// # Example
    ///
    /// ```
    /// use terrainlayer::coord::TileCoord;
    /// use terrainlayer::provider::TileEndpoint;
    ///
    /// let endpoint = TileEndpoint::new("https://tiles.example.com/", "terrarium");
    /// let tile = TileCoord::new(100, 200, 14).unwrap();
    /// assert_eq!(
    ///     endpoint.tile_url(&tile),
    ///     "https://tiles.example.com/terrarium/14/100/200.png"
    /// );
    /// ```
    pub fn tile_url(&self, tile: &TileCoord) -> String {
        let base = self.base_url.trim_end_matches('/');
        let layer = self.layer_path.trim_matches('/');
        if layer.is_empty() {
            format!("{}/{}/{}/{}.png", base, tile.zoom, tile.x, tile.y)
        } else {
            format!("{}/{}/{}/{}/{}.png", base, layer, tile.zoom, tile.x, tile.y)
        }
    }
}

/// Endpoints for both terrain layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileServers {
    pub elevation: TileEndpoint,
    pub landcover: TileEndpoint,
}

impl TileServers {
    pub fn endpoint(&self, layer: TileLayer) -> &TileEndpoint {
        match layer {
            TileLayer::Elevation => &self.elevation,
            TileLayer::Landcover => &self.landcover,
        }
    }
}

impl Default for TileServers {
    fn default() -> Self {
        Self {
            elevation: TileEndpoint::new(
                crate::config::DEFAULT_ELEVATION_URL,
                crate::config::DEFAULT_ELEVATION_LAYER,
            ),
            landcover: TileEndpoint::new(
                crate::config::DEFAULT_LANDCOVER_URL,
                crate::config::DEFAULT_LANDCOVER_LAYER,
            ),
        }
    }
}

/// Trait for terrain tile sources.
///
/// Implementors return the raw encoded image bytes for one tile of one
/// layer. Decoding and validation happen in the tile store.
pub trait TileProvider: Send + Sync {
    /// Downloads the encoded image for a tile.
    fn download_tile(&self, layer: TileLayer, tile: &TileCoord) -> Result<Vec<u8>, ProviderError>;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;

    /// Returns the minimum supported zoom level.
    fn min_zoom(&self) -> u8 {
        crate::coord::MIN_ZOOM
    }

    /// Returns the maximum supported zoom level.
    fn max_zoom(&self) -> u8 {
        crate::coord::MAX_ZOOM
    }

    /// Checks if this provider supports the given zoom level.
    fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }
}
