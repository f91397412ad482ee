//! Stitching, normalization and power-of-two resampling.

use crate::elevation::ElevationGrid;
use crate::mosaic::neighborhood::Neighborhood;
use crate::mosaic::{HeightmapImage, MosaicError};
use crate::tile::TileLayer;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, RgbImage};

/// Single channel float raster used between normalization and encoding.
pub type NormalizedGrid = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Pixel offsets of each column and row inside the stitched raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub column_x: [u32; 3],
    pub row_y: [u32; 3],
    pub width: u32,
    pub height: u32,
}

/// Computes the stitched layout from per-tile `(width, height)`.
///
/// Every tile in a column must match the column's width and every tile in a
/// row must match the row's height.
pub fn layout(
    layer: TileLayer,
    tiles: &Neighborhood,
    sizes: &[[(u32, u32); 3]; 3],
) -> Result<Layout, MosaicError> {
    let widths = [sizes[0][0].0, sizes[1][0].0, sizes[2][0].0];
    let heights = [sizes[0][0].1, sizes[0][1].1, sizes[0][2].1];

    for col in 0..3 {
        for row in 0..3 {
            let (w, h) = sizes[col][row];
            if w != widths[col] || h != heights[row] {
                return Err(MosaicError::TileSizeMismatch {
                    layer,
                    tile: tiles[col][row],
                    expected_width: widths[col],
                    expected_height: heights[row],
                    found_width: w,
                    found_height: h,
                });
            }
        }
    }

    Ok(Layout {
        column_x: [0, widths[0], widths[0] + widths[1]],
        row_y: [0, heights[0], heights[0] + heights[1]],
        width: widths.iter().sum(),
        height: heights.iter().sum(),
    })
}

/// Stitches nine elevation grids (as columns) into one.
pub fn stitch_grids(
    tiles: &Neighborhood,
    grids: &[[ElevationGrid; 3]; 3],
) -> Result<ElevationGrid, MosaicError> {
    let sizes = grids.each_ref().map(|col| col.each_ref().map(|g| (g.width(), g.height())));
    let layout = layout(TileLayer::Elevation, tiles, &sizes)?;

    let mut values = vec![0.0f64; layout.width as usize * layout.height as usize];
    for (col, column) in grids.iter().enumerate() {
        for (row, grid) in column.iter().enumerate() {
            let x0 = layout.column_x[col] as usize;
            let y0 = layout.row_y[row] as usize;
            for y in 0..grid.height() {
                let start = (y0 + y as usize) * layout.width as usize + x0;
                values[start..start + grid.width() as usize].copy_from_slice(grid.row(y));
            }
        }
    }

    // Length matches the layout by construction
    ElevationGrid::from_vec(layout.width, layout.height, values).ok_or_else(|| {
        MosaicError::IncompleteNeighborhood {
            center: tiles[1][1],
            reason: "stitched elevation grid has the wrong size".to_string(),
            source: None,
        }
    })
}

/// Stitches nine landcover images (as columns) into one.
pub fn stitch_images(
    tiles: &Neighborhood,
    images: &[[&RgbImage; 3]; 3],
) -> Result<RgbImage, MosaicError> {
    let sizes = images.each_ref().map(|col| col.each_ref().map(|i| i.dimensions()));
    let layout = layout(TileLayer::Landcover, tiles, &sizes)?;

    let mut canvas = RgbImage::new(layout.width, layout.height);
    for (col, column) in images.iter().enumerate() {
        for (row, image) in column.iter().enumerate() {
            imageops::replace(
                &mut canvas,
                *image,
                layout.column_x[col].into(),
                layout.row_y[row].into(),
            );
        }
    }
    Ok(canvas)
}

/// Normalizes a grid against its own range.
///
/// Returns the normalized raster with `z0` and `zscale`:
/// `z0 = min`, `zscale = max(min_zscale, max - z0)`, and every value maps to
/// `clamp((v - z0) / zscale, 0, 1)`.
pub fn normalize(grid: &ElevationGrid, min_zscale: f64) -> (NormalizedGrid, f64, f64) {
    let (z0, zmax) = grid.min_max().unwrap_or((0.0, 0.0));
    let zscale = min_zscale.max(zmax - z0);

    let values = grid
        .values()
        .iter()
        .map(|v| ((v - z0) / zscale).clamp(0.0, 1.0) as f32)
        .collect();
    let normalized = NormalizedGrid::from_raw(grid.width(), grid.height(), values)
        .unwrap_or_else(|| NormalizedGrid::new(grid.width(), grid.height()));

    (normalized, z0, zscale)
}

/// Applies a gaussian blur; a non-positive sigma returns the grid unchanged.
pub fn smooth(grid: NormalizedGrid, sigma: f32) -> NormalizedGrid {
    if sigma > 0.0 {
        imageops::blur(&grid, sigma)
    } else {
        grid
    }
}

/// Smallest power of two at or above each dimension.
pub fn pow2_dimensions(width: u32, height: u32) -> (u32, u32) {
    (width.next_power_of_two(), height.next_power_of_two())
}

/// Resizes a normalized grid to power-of-two dimensions.
pub fn resize_grid(grid: &NormalizedGrid) -> NormalizedGrid {
    let (w, h) = pow2_dimensions(grid.width(), grid.height());
    if (w, h) == grid.dimensions() {
        return grid.clone();
    }
    imageops::resize(grid, w, h, FilterType::Triangle)
}

/// Resizes a landcover image to power-of-two dimensions.
pub fn resize_image(image: &RgbImage) -> RgbImage {
    let (w, h) = pow2_dimensions(image.width(), image.height());
    if (w, h) == image.dimensions() {
        return image.clone();
    }
    imageops::resize(image, w, h, FilterType::Triangle)
}

/// Encodes `[0, 1]` values as 16-bit luma, 1 mapping to 65535.
pub fn encode_heightmap(grid: &NormalizedGrid) -> HeightmapImage {
    HeightmapImage::from_fn(grid.width(), grid.height(), |x, y| {
        let v = grid.get_pixel(x, y).0[0].clamp(0.0, 1.0);
        Luma([(v * u16::MAX as f32).round() as u16])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use crate::mosaic::neighborhood::neighborhood;
    use image::Rgb;

    fn tiles() -> Neighborhood {
        neighborhood(&TileCoord::new(10, 10, 6).unwrap()).unwrap()
    }

    fn grid(width: u32, height: u32, value: f64) -> ElevationGrid {
        ElevationGrid::from_vec(width, height, vec![value; (width * height) as usize]).unwrap()
    }

    #[test]
    fn test_layout_uniform() {
        let sizes = [[(256, 256); 3]; 3];
        let layout = layout(TileLayer::Elevation, &tiles(), &sizes).unwrap();

        assert_eq!(layout.width, 768);
        assert_eq!(layout.height, 768);
        assert_eq!(layout.column_x, [0, 256, 512]);
        assert_eq!(layout.row_y, [0, 256, 512]);
    }

    #[test]
    fn test_layout_mixed_columns_and_rows() {
        let mut sizes = [[(4, 2); 3]; 3];
        // Middle column wider, last row taller
        for row in 0..3 {
            sizes[1][row].0 = 6;
        }
        for col in 0..3 {
            sizes[col][2].1 = 5;
        }
        let layout = layout(TileLayer::Landcover, &tiles(), &sizes).unwrap();

        assert_eq!(layout.width, 14);
        assert_eq!(layout.height, 9);
        assert_eq!(layout.column_x, [0, 4, 10]);
        assert_eq!(layout.row_y, [0, 2, 4]);
    }

    #[test]
    fn test_layout_mismatch() {
        let mut sizes = [[(4, 4); 3]; 3];
        sizes[2][1] = (4, 3);
        let err = layout(TileLayer::Elevation, &tiles(), &sizes).unwrap_err();

        match err {
            MosaicError::TileSizeMismatch {
                tile,
                found_height,
                expected_height,
                ..
            } => {
                assert_eq!(tile, tiles()[2][1]);
                assert_eq!(found_height, 3);
                assert_eq!(expected_height, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_stitch_grids_places_columns_then_rows() {
        let grids: [[ElevationGrid; 3]; 3] = std::array::from_fn(|col| {
            std::array::from_fn(|row| grid(2, 2, (col * 10 + row) as f64))
        });

        let stitched = stitch_grids(&tiles(), &grids).unwrap();

        assert_eq!(stitched.width(), 6);
        assert_eq!(stitched.height(), 6);
        // Column 0, row 2 lands bottom-left
        assert_eq!(stitched.get(0, 5), 2.0);
        // Column 2, row 0 lands top-right
        assert_eq!(stitched.get(5, 0), 20.0);
        assert_eq!(stitched.get(3, 3), 11.0);
    }

    #[test]
    fn test_stitch_images() {
        let images: [[RgbImage; 3]; 3] = std::array::from_fn(|col| {
            std::array::from_fn(|row| RgbImage::from_pixel(3, 3, Rgb([col as u8, row as u8, 0])))
        });

        let refs = images.each_ref().map(|col| col.each_ref());
        let stitched = stitch_images(&tiles(), &refs).unwrap();

        assert_eq!(stitched.dimensions(), (9, 9));
        assert_eq!(stitched.get_pixel(8, 0).0, [2, 0, 0]);
        assert_eq!(stitched.get_pixel(0, 8).0, [0, 2, 0]);
    }

    #[test]
    fn test_normalize_with_range_above_floor() {
        let g = ElevationGrid::from_vec(2, 1, vec![100.0, 600.0]).unwrap();
        let (n, z0, zscale) = normalize(&g, 250.0);

        assert_eq!(z0, 100.0);
        assert_eq!(zscale, 500.0);
        assert_eq!(n.get_pixel(0, 0).0[0], 0.0);
        assert_eq!(n.get_pixel(1, 0).0[0], 1.0);
    }

    #[test]
    fn test_normalize_flat_uses_floor() {
        let g = ElevationGrid::from_vec(2, 1, vec![10.0, 60.0]).unwrap();
        let (n, z0, zscale) = normalize(&g, 250.0);

        assert_eq!(z0, 10.0);
        assert_eq!(zscale, 250.0);
        assert!((n.get_pixel(1, 0).0[0] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_pow2_dimensions() {
        assert_eq!(pow2_dimensions(768, 768), (1024, 1024));
        assert_eq!(pow2_dimensions(1536, 768), (2048, 1024));
        assert_eq!(pow2_dimensions(1025, 1025), (2048, 2048));
        assert_eq!(pow2_dimensions(512, 9), (512, 16));
    }

    #[test]
    fn test_resize_grid_keeps_constant_value() {
        let g = NormalizedGrid::from_pixel(6, 3, Luma([0.5]));
        let resized = resize_grid(&g);

        assert_eq!(resized.dimensions(), (8, 4));
        assert!(resized.pixels().all(|p| (p.0[0] - 0.5).abs() < 1e-4));
    }

    #[test]
    fn test_smooth_disabled() {
        let mut g = NormalizedGrid::new(4, 4);
        g.put_pixel(2, 2, Luma([1.0]));
        let out = smooth(g.clone(), 0.0);
        assert_eq!(out, g);
    }

    #[test]
    fn test_encode_heightmap_endpoints() {
        let mut g = NormalizedGrid::new(3, 1);
        g.put_pixel(1, 0, Luma([0.5]));
        g.put_pixel(2, 0, Luma([1.0]));

        let image = encode_heightmap(&g);

        assert_eq!(image.get_pixel(0, 0).0[0], 0);
        assert_eq!(image.get_pixel(1, 0).0[0], 32768);
        assert_eq!(image.get_pixel(2, 0).0[0], 65535);
    }
}
