//! Tile identity and raster types.

use crate::coord::TileCoord;
use image::RgbImage;
use std::fmt;

/// The two raster layers streamed for every tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileLayer {
    /// Terrarium-encoded elevation
    Elevation,
    /// Hue-normalized landcover texture
    Landcover,
}

impl TileLayer {
    /// Both layers, elevation first.
    pub const ALL: [TileLayer; 2] = [TileLayer::Elevation, TileLayer::Landcover];

    /// Directory name under the cache root.
    pub fn cache_dir_name(&self) -> &'static str {
        match self {
            TileLayer::Elevation => "terrarium",
            TileLayer::Landcover => "terrain-background",
        }
    }
}

impl fmt::Display for TileLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileLayer::Elevation => write!(f, "elevation"),
            TileLayer::Landcover => write!(f, "landcover"),
        }
    }
}

/// Identity of one cached tile: layer plus slippy coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    pub layer: TileLayer,
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileKey {
    pub fn new(layer: TileLayer, zoom: u8, x: u32, y: u32) -> Self {
        Self { layer, zoom, x, y }
    }

    pub fn from_tile(layer: TileLayer, tile: &TileCoord) -> Self {
        Self::new(layer, tile.zoom, tile.x, tile.y)
    }

    pub fn tile(&self) -> TileCoord {
        TileCoord {
            x: self.x,
            y: self.y,
            zoom: self.zoom,
        }
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.layer, self.zoom, self.x, self.y)
    }
}

/// A decoded, validated tile image.
///
/// Immutable once created by the tile store.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterTile {
    key: TileKey,
    image: RgbImage,
}

impl RasterTile {
    pub fn new(key: TileKey, image: RgbImage) -> Self {
        Self { key, image }
    }

    pub fn key(&self) -> &TileKey {
        &self.key
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
