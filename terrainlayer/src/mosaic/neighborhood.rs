//! The 3×3 block of tiles around a center tile.

use crate::coord::{tile_bounds, tile_size_meters, MercatorBounds, TileCoord};
use crate::mosaic::MosaicError;

/// Tiles of a neighborhood as columns, west to east, each column north to
/// south. `columns[1][1]` is the center.
pub type Neighborhood = [[TileCoord; 3]; 3];

/// Lists the neighborhood of `center`.
///
/// Columns wrap around the antimeridian. A center in the first or last row
/// has no complete neighborhood.
pub fn neighborhood(center: &TileCoord) -> Result<Neighborhood, MosaicError> {
    let mut columns = [[*center; 3]; 3];
    for (col, dx) in (-1i64..=1).enumerate() {
        for (row, dy) in (-1i64..=1).enumerate() {
            columns[col][row] =
                center
                    .offset(dx, dy)
                    .ok_or_else(|| MosaicError::IncompleteNeighborhood {
                        center: *center,
                        reason: format!("row {} is outside the map", center.y as i64 + dy),
                        source: None,
                    })?;
        }
    }
    Ok(columns)
}

/// Projected extent of the neighborhood.
///
/// The extent is contiguous even when the columns wrap, so near the
/// antimeridian it reaches past the edge of the world.
pub fn neighborhood_bounds(center: &TileCoord) -> MercatorBounds {
    let b = tile_bounds(center);
    let size = tile_size_meters(center.zoom);
    MercatorBounds::new(b.min_x - size, b.min_y - size, b.max_x + size, b.max_y + size)
}
