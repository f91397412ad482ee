//! Coordinate conversion module
//!
//! Spherical Mercator (EPSG:3857) math for the XYZ slippy tile scheme used by
//! the terrain tile servers: tile bounds in projected meters, meters to tile
//! index, and geographic conversions.

mod types;

pub use types::{
    tiles_per_axis, CoordError, MercatorBounds, TileCoord, EARTH_RADIUS, MAX_LAT, MAX_LON,
    MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM, ORIGIN_SHIFT,
};

use std::f64::consts::PI;

/// Edge length of one tile in projected meters at `zoom`.
#[inline]
pub fn tile_size_meters(zoom: u8) -> f64 {
    2.0 * ORIGIN_SHIFT / tiles_per_axis(zoom) as f64
}

/// Returns the projected bounds of a tile.
///
/// # Example
///
/// ```
/// use terrainlayer::coord::{tile_bounds, TileCoord, ORIGIN_SHIFT};
///
/// let tile = TileCoord::new(0, 0, 1).unwrap();
/// let bounds = tile_bounds(&tile);
/// assert_eq!(bounds.min_x, -ORIGIN_SHIFT);
/// assert_eq!(bounds.max_y, ORIGIN_SHIFT);
/// ```
pub fn tile_bounds(tile: &TileCoord) -> MercatorBounds {
    let size = tile_size_meters(tile.zoom);
    let min_x = -ORIGIN_SHIFT + tile.x as f64 * size;
    let max_y = ORIGIN_SHIFT - tile.y as f64 * size;
    MercatorBounds::new(min_x, max_y - size, min_x + size, max_y)
}

/// Converts a projected position to the tile containing it.
///
/// Positions exactly on the eastern or southern world edge belong to the
/// last tile of the row/column.
pub fn meters_to_tile(mx: f64, my: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(CoordError::InvalidZoom(zoom));
    }
    if !mx.is_finite()
        || !my.is_finite()
        || mx.abs() > ORIGIN_SHIFT
        || my.abs() > ORIGIN_SHIFT
    {
        return Err(CoordError::OutOfWorld { x: mx, y: my });
    }

    let size = tile_size_meters(zoom);
    let last = tiles_per_axis(zoom) - 1;
    let x = (((mx + ORIGIN_SHIFT) / size).floor() as u32).min(last);
    let y = (((ORIGIN_SHIFT - my) / size).floor() as u32).min(last);

    Ok(TileCoord { x, y, zoom })
}

/// Converts geographic coordinates to projected meters.
pub fn lat_lon_to_meters(lat: f64, lon: f64) -> Result<(f64, f64), CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }

    let mx = lon * ORIGIN_SHIFT / 180.0;
    let lat_rad = lat * PI / 180.0;
    // MAX_LAT is rounded up from the true Mercator limit
    let my = (lat_rad.tan().asinh() * EARTH_RADIUS).clamp(-ORIGIN_SHIFT, ORIGIN_SHIFT);
    Ok((mx, my))
}

/// Converts projected meters back to `(lat, lon)` degrees.
pub fn meters_to_lat_lon(mx: f64, my: f64) -> (f64, f64) {
    let lon = mx / ORIGIN_SHIFT * 180.0;
    let lat = (my / EARTH_RADIUS).sinh().atan() * 180.0 / PI;
    (lat, lon)
}

/// Converts geographic coordinates to tile coordinates.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (1 to 15)
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    let (mx, my) = lat_lon_to_meters(lat, lon)?;
    meters_to_tile(mx, my, zoom)
}

#[cfg(test)]
mod tests;
