//! Landcover hue normalization.
//!
//! Landcover tiles carry terrain class in their hue. Saturation and value
//! vary between map styles and zoom levels, so they are pinned before the
//! tile is cached: on the 8-bit HSV scale saturation becomes 100 and value
//! 165. In RGB terms every output pixel has its largest channel at 165 and
//! its smallest at 100, with the middle channel carrying the hue.
//!
//! Running the transform on its own output returns the same pixels.
//!
//! Hue is kept at full precision and the middle channel is interpolated
//! linearly between 100 and 165. Converters that store hue as an 8-bit
//! channel and rebuild RGB as `round(v * (1 - s * f))` can land one level
//! away on intermediate hues: `[255, 128, 0]` gives `[165, 133, 100]` here
//! and `[165, 132, 100]` through an 8-bit hue. Pure and secondary hues agree.

use image::{Rgb, RgbImage};

/// Pinned HSV value (8-bit scale).
pub const LANDCOVER_VALUE: u8 = 165;

/// Pinned HSV saturation (8-bit scale).
pub const LANDCOVER_SATURATION: u8 = 100;

/// Smallest channel implied by the pinned value and saturation.
const LANDCOVER_MIN: u8 = 100;

const CHROMA: f64 = (LANDCOVER_VALUE - LANDCOVER_MIN) as f64;

/// Normalizes every pixel of a landcover image in place.
pub fn normalize_landcover(image: &mut RgbImage) {
    for pixel in image.pixels_mut() {
        *pixel = Rgb(normalize_pixel(pixel.0));
    }
}

/// Replaces a pixel's saturation and value, keeping its hue.
///
/// Gray pixels have no hue and map to hue 0.
pub fn normalize_pixel(rgb: [u8; 3]) -> [u8; 3] {
    let hue = hue_sextant(rgb);
    let sector = (hue.floor() as i64).rem_euclid(6);
    let frac = hue - hue.floor();

    let v = LANDCOVER_VALUE;
    let p = LANDCOVER_MIN;
    let step = (CHROMA * frac).round() as u8;
    let rising = p + step;
    let falling = v - step;

    match sector {
        0 => [v, rising, p],
        1 => [falling, v, p],
        2 => [p, v, rising],
        3 => [p, falling, v],
        4 => [rising, p, v],
        _ => [v, p, falling],
    }
}

/// Hue in sextants, `[0, 6)`.
fn hue_sextant([r, g, b]: [u8; 3]) -> f64 {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    }
}
