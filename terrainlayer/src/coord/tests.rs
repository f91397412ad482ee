//! Tests for coordinate conversion

use super::*;
use proptest::prelude::*;

#[test]
fn test_london_at_zoom_10() {
    // London: 51.5074°N, 0.1278°W
    let result = to_tile_coords(51.5074, -0.1278, 10);
    assert!(result.is_ok());

    let tile = result.unwrap();
    assert_eq!(tile.x, 511);
    assert_eq!(tile.y, 340);
    assert_eq!(tile.zoom, 10);
}

#[test]
fn test_equator_prime_meridian() {
    // 0°N, 0°E sits on the corner shared by the four zoom 1 tiles; the
    // south-east one owns it
    let tile = to_tile_coords(0.0, 0.0, 1).unwrap();
    assert_eq!(tile.x, 1);
    assert_eq!(tile.y, 1);
}

#[test]
fn test_invalid_latitude_too_high() {
    let result = to_tile_coords(90.0, 0.0, 10);
    assert!(matches!(
        result.unwrap_err(),
        CoordError::InvalidLatitude(_)
    ));
}

#[test]
fn test_invalid_longitude_too_low() {
    let result = to_tile_coords(0.0, -181.0, 10);
    assert!(matches!(
        result.unwrap_err(),
        CoordError::InvalidLongitude(_)
    ));
}

#[test]
fn test_invalid_zoom() {
    assert!(matches!(
        to_tile_coords(0.0, 0.0, 16).unwrap_err(),
        CoordError::InvalidZoom(16)
    ));
    assert!(matches!(
        TileCoord::new(0, 0, 0).unwrap_err(),
        CoordError::InvalidZoom(0)
    ));
}

#[test]
fn test_tile_out_of_range() {
    assert!(TileCoord::new(3, 3, 2).is_ok());
    assert_eq!(
        TileCoord::new(4, 0, 2).unwrap_err(),
        CoordError::TileOutOfRange { x: 4, y: 0, zoom: 2 }
    );
}

#[test]
fn test_tile_bounds_cover_world_at_zoom_1() {
    let nw = tile_bounds(&TileCoord::new(0, 0, 1).unwrap());
    let se = tile_bounds(&TileCoord::new(1, 1, 1).unwrap());

    assert_eq!(nw.min_x, -ORIGIN_SHIFT);
    assert_eq!(nw.max_y, ORIGIN_SHIFT);
    assert!(nw.max_x.abs() < 1e-6);
    assert!(nw.min_y.abs() < 1e-6);

    assert!((se.max_x - ORIGIN_SHIFT).abs() < 1e-6);
    assert!((se.min_y + ORIGIN_SHIFT).abs() < 1e-6);
}

#[test]
fn test_tile_bounds_size_matches_zoom() {
    let tile = TileCoord::new(100, 100, 14).unwrap();
    let bounds = tile_bounds(&tile);
    let expected = 2.0 * ORIGIN_SHIFT / 16384.0;

    assert!((bounds.width() - expected).abs() < 1e-6);
    assert!((bounds.height() - expected).abs() < 1e-6);
}

#[test]
fn test_meters_to_tile_center_round_trip() {
    let tile = TileCoord::new(100, 100, 14).unwrap();
    let (cx, cy) = tile_bounds(&tile).center();
    assert_eq!(meters_to_tile(cx, cy, 14).unwrap(), tile);
}

#[test]
fn test_meters_to_tile_world_edges() {
    // East and south edges belong to the last column and row
    let tile = meters_to_tile(ORIGIN_SHIFT, -ORIGIN_SHIFT, 3).unwrap();
    assert_eq!(tile.x, 7);
    assert_eq!(tile.y, 7);

    let tile = meters_to_tile(-ORIGIN_SHIFT, ORIGIN_SHIFT, 3).unwrap();
    assert_eq!(tile.x, 0);
    assert_eq!(tile.y, 0);
}

#[test]
fn test_meters_to_tile_out_of_world() {
    let result = meters_to_tile(ORIGIN_SHIFT * 1.01, 0.0, 5);
    assert!(matches!(result, Err(CoordError::OutOfWorld { .. })));

    let result = meters_to_tile(f64::NAN, 0.0, 5);
    assert!(matches!(result, Err(CoordError::OutOfWorld { .. })));
}

#[test]
fn test_offset_wraps_longitude() {
    let tile = TileCoord::new(0, 5, 4).unwrap();
    let west = tile.offset(-1, 0).unwrap();
    assert_eq!(west.x, 15);
    assert_eq!(west.y, 5);

    let east = TileCoord::new(15, 5, 4).unwrap().offset(1, 0).unwrap();
    assert_eq!(east.x, 0);
}

#[test]
fn test_offset_stops_at_poles() {
    let top = TileCoord::new(3, 0, 4).unwrap();
    assert!(top.offset(0, -1).is_none());
    assert_eq!(top.offset(0, 1).unwrap().y, 1);

    let bottom = TileCoord::new(3, 15, 4).unwrap();
    assert!(bottom.offset(1, 1).is_none());
}

#[test]
fn test_bounds_union() {
    let a = tile_bounds(&TileCoord::new(10, 10, 8).unwrap());
    let b = tile_bounds(&TileCoord::new(12, 12, 8).unwrap());
    let u = a.union(&b);

    assert_eq!(u.min_x, a.min_x);
    assert_eq!(u.max_y, a.max_y);
    assert_eq!(u.max_x, b.max_x);
    assert_eq!(u.min_y, b.min_y);
    assert!((u.width() - 3.0 * a.width()).abs() < 1e-6);
}

#[test]
fn test_lat_lon_meters_round_trip() {
    let (mx, my) = lat_lon_to_meters(45.0, 7.5).unwrap();
    let (lat, lon) = meters_to_lat_lon(mx, my);
    assert!((lat - 45.0).abs() < 1e-9);
    assert!((lon - 7.5).abs() < 1e-9);
}

#[test]
fn test_display() {
    let tile = TileCoord::new(100, 200, 14).unwrap();
    assert_eq!(tile.to_string(), "14/100/200");

    let err = CoordError::InvalidZoom(20);
    assert!(err.to_string().contains("20"));
}

proptest! {
    #[test]
    fn prop_tile_bounds_center_maps_back(
        zoom in MIN_ZOOM..=MAX_ZOOM,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let n = tiles_per_axis(zoom);
        let x = ((fx * n as f64) as u32).min(n - 1);
        let y = ((fy * n as f64) as u32).min(n - 1);
        let tile = TileCoord::new(x, y, zoom).unwrap();

        let (cx, cy) = tile_bounds(&tile).center();
        prop_assert_eq!(meters_to_tile(cx, cy, zoom).unwrap(), tile);
    }

    #[test]
    fn prop_valid_coordinates_produce_valid_tiles(
        lat in MIN_LAT..MAX_LAT,
        lon in MIN_LON..MAX_LON,
        zoom in MIN_ZOOM..=MAX_ZOOM,
    ) {
        let tile = to_tile_coords(lat, lon, zoom).unwrap();
        let n = tiles_per_axis(zoom);
        prop_assert!(tile.x < n);
        prop_assert!(tile.y < n);
    }
}
