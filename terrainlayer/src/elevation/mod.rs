//! Terrarium elevation codec.
//!
//! Terrarium tiles store meters in the RGB channels of a PNG:
//!
//! ```text
//! elevation = R * 256 + G + B / 256 - 32768
//! ```
//!
//! which covers -32768 m to +32767.996 m in 1/256 m steps.

use crate::tile::RasterTile;

/// Offset added before encoding so that all values are positive.
pub const TERRARIUM_OFFSET: f64 = 32768.0;

/// Smallest representable elevation step in meters.
pub const TERRARIUM_STEP: f64 = 1.0 / 256.0;

/// Row-major grid of elevations in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl ElevationGrid {
    /// Wraps row-major values. Returns `None` when the length does not match
    /// the dimensions.
    pub fn from_vec(width: u32, height: u32, values: Vec<f64>) -> Option<Self> {
        if values.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Value at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.values[y as usize * self.width as usize + x as usize]
    }

    /// One row of the grid.
    pub fn row(&self, y: u32) -> &[f64] {
        let start = y as usize * self.width as usize;
        &self.values[start..start + self.width as usize]
    }

    /// `(min, max)` over all values, `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Decodes every pixel of a Terrarium tile.
pub fn decode(tile: &RasterTile) -> ElevationGrid {
    let image = tile.image();
    let values = image.pixels().map(|p| decode_pixel(p.0)).collect();
    ElevationGrid {
        width: image.width(),
        height: image.height(),
        values,
    }
}

/// Decodes one Terrarium pixel to meters.
#[inline]
pub fn decode_pixel([r, g, b]: [u8; 3]) -> f64 {
    r as f64 * 256.0 + g as f64 + b as f64 / 256.0 - TERRARIUM_OFFSET
}

/// Encodes meters as a Terrarium pixel.
///
/// Values are rounded to the nearest 1/256 m and clamped to the encodable
/// range.
///
/// # Example
///
/// ```
/// use terrainlayer::elevation::{decode_pixel, encode_pixel};
///
/// assert_eq!(encode_pixel(0.0), [128, 0, 0]);
/// assert_eq!(decode_pixel(encode_pixel(8848.5)), 8848.5);
/// ```
pub fn encode_pixel(meters: f64) -> [u8; 3] {
    const MAX_SCALED: f64 = (1u32 << 24) as f64 - 1.0;
    let scaled = ((meters + TERRARIUM_OFFSET) * 256.0)
        .round()
        .clamp(0.0, MAX_SCALED) as u32;
    [(scaled >> 16) as u8, (scaled >> 8) as u8, scaled as u8]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{TileKey, TileLayer};
    use image::{Rgb, RgbImage};
    use proptest::prelude::*;

    #[test]
    fn test_decode_reference_pixels() {
        assert_eq!(decode_pixel([128, 0, 0]), 0.0);
        assert_eq!(decode_pixel([0, 0, 0]), -32768.0);
        assert_eq!(decode_pixel([128, 1, 128]), 1.5);
        assert_eq!(decode_pixel([127, 255, 0]), -1.0);
    }

    #[test]
    fn test_encode_clamps() {
        assert_eq!(encode_pixel(-40000.0), [0, 0, 0]);
        assert_eq!(encode_pixel(40000.0), [255, 255, 255]);
    }

    #[test]
    fn test_decode_tile() {
        let mut image = RgbImage::from_pixel(3, 2, Rgb(encode_pixel(100.0)));
        image.put_pixel(2, 1, Rgb(encode_pixel(-12.25)));
        let tile = RasterTile::new(TileKey::new(TileLayer::Elevation, 1, 0, 0), image);

        let grid = decode(&tile);

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(0, 0), 100.0);
        assert_eq!(grid.get(2, 1), -12.25);
        assert_eq!(grid.row(1), &[100.0, 100.0, -12.25]);
        assert_eq!(grid.min_max(), Some((-12.25, 100.0)));
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(ElevationGrid::from_vec(2, 2, vec![0.0; 4]).is_some());
        assert!(ElevationGrid::from_vec(2, 2, vec![0.0; 3]).is_none());
        assert_eq!(ElevationGrid::from_vec(0, 0, vec![]).unwrap().min_max(), None);
    }

    proptest! {
        #[test]
        fn prop_decode_encode_pixel(r: u8, g: u8, b: u8) {
            prop_assert_eq!(encode_pixel(decode_pixel([r, g, b])), [r, g, b]);
        }

        #[test]
        fn prop_grid_values_round_trip(steps in 0u32..(1 << 24)) {
            let meters = steps as f64 * TERRARIUM_STEP - TERRARIUM_OFFSET;
            prop_assert_eq!(decode_pixel(encode_pixel(meters)), meters);
        }
    }
}
