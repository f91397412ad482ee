//! Mosaic types, configuration and errors.

use crate::coord::TileCoord;
use crate::tile::{FetchError, TileLayer};
use image::{ImageBuffer, Luma, RgbImage};
use thiserror::Error;

/// 16-bit single channel heightmap, 0 maps to `z0` and 65535 to
/// `z0 + zscale`.
pub type HeightmapImage = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Default floor for the vertical scale in meters.
pub const DEFAULT_MIN_ZSCALE: f64 = 250.0;

/// Default gaussian sigma (in source pixels) for seam smoothing.
pub const DEFAULT_SMOOTHING_SIGMA: f32 = 1.0;

/// Normalized 3×3 neighborhood ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    pub elevation: HeightmapImage,
    pub landcover: RgbImage,
    /// Lowest elevation in the neighborhood, meters
    pub z0: f64,
    /// Meters spanned by the full heightmap range
    pub zscale: f64,
    /// Center tile of the neighborhood
    pub source_tile: TileCoord,
}

/// Mosaic build settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicConfig {
    /// Lower bound for `zscale`, keeps flat areas from being stretched
    pub min_zscale: f64,
    /// Gaussian sigma applied to the normalized heightmap, 0 disables
    pub smoothing_sigma: f32,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            min_zscale: DEFAULT_MIN_ZSCALE,
            smoothing_sigma: DEFAULT_SMOOTHING_SIGMA,
        }
    }
}

/// Errors raised while building a mosaic.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// A required tile could not be fetched, or the neighborhood leaves the
    /// map vertically
    #[error("Neighborhood of {center} is incomplete: {reason}")]
    IncompleteNeighborhood {
        center: TileCoord,
        reason: String,
        #[source]
        source: Option<FetchError>,
    },

    /// Tiles in one column differ in width or tiles in one row in height
    #[error(
        "{layer} tile {tile} is {found_width}x{found_height}, expected {expected_width}x{expected_height}"
    )]
    TileSizeMismatch {
        layer: TileLayer,
        tile: TileCoord,
        expected_width: u32,
        expected_height: u32,
        found_width: u32,
        found_height: u32,
    },
}

/// Builds mosaics around a center tile.
///
/// This is the seam the stream worker depends on; tests substitute a
/// generator that needs no network or disk.
pub trait MosaicGenerator: Send + Sync {
    /// Builds the mosaic centered on `center`.
    fn build(&self, center: &TileCoord) -> Result<Mosaic, MosaicError>;
}
