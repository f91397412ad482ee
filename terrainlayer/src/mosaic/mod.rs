//! Mosaic assembly.
//!
//! Turns the 3×3 neighborhood around a center tile into one heightmap and
//! one landcover texture:
//!
//! 1. Fetch the 9 elevation and 9 landcover tiles (in parallel)
//! 2. Decode elevation and stitch both layers column by column
//! 3. Normalize elevation to `[0, 1]` against `z0`/`zscale`
//! 4. Optionally blur the normalized heightmap to hide tile seams
//! 5. Resample each raster to power-of-two dimensions
//! 6. Encode the heightmap as 16-bit luma

mod assemble;
mod builder;
mod neighborhood;
mod types;

pub use assemble::{
    encode_heightmap, normalize, pow2_dimensions, resize_grid, resize_image, smooth, stitch_grids,
    stitch_images, Layout, NormalizedGrid,
};
pub use builder::MosaicBuilder;
pub use neighborhood::{neighborhood, neighborhood_bounds, Neighborhood};
pub use types::{
    HeightmapImage, Mosaic, MosaicConfig, MosaicError, MosaicGenerator, DEFAULT_MIN_ZSCALE,
    DEFAULT_SMOOTHING_SIGMA,
};
