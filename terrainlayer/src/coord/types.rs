//! Coordinate type definitions

use std::f64::consts::PI;
use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom levels served by the terrain tile servers
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 15;

/// WGS84 equatorial radius in meters (EPSG:3857 sphere)
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the projected world width in meters.
pub const ORIGIN_SHIFT: f64 = PI * EARTH_RADIUS;

/// Tile coordinates in the XYZ slippy map scheme.
///
/// `x` grows eastwards from the antimeridian, `y` grows southwards from the
/// northern edge of the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// X coordinate (east-west), 0 at west
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
    /// Zoom level (1-15)
    pub zoom: u8,
}

impl TileCoord {
    /// Creates a validated tile coordinate.
    pub fn new(x: u32, y: u32, zoom: u8) -> Result<Self, CoordError> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            return Err(CoordError::InvalidZoom(zoom));
        }
        let n = tiles_per_axis(zoom);
        if x >= n || y >= n {
            return Err(CoordError::TileOutOfRange { x, y, zoom });
        }
        Ok(Self { x, y, zoom })
    }

    /// Returns the tile `dx` columns and `dy` rows away.
    ///
    /// Columns wrap around the antimeridian. Returns `None` when the row
    /// leaves the map.
    pub fn offset(&self, dx: i64, dy: i64) -> Option<TileCoord> {
        let n = tiles_per_axis(self.zoom) as i64;
        let y = self.y as i64 + dy;
        if y < 0 || y >= n {
            return None;
        }
        let x = (self.x as i64 + dx).rem_euclid(n);
        Some(TileCoord {
            x: x as u32,
            y: y as u32,
            zoom: self.zoom,
        })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Number of tiles along one axis at a zoom level.
#[inline]
pub fn tiles_per_axis(zoom: u8) -> u32 {
    1u32 << zoom
}

/// Axis-aligned rectangle in EPSG:3857 meters.
///
/// `min_y` is the southern edge, `max_y` the northern edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl MercatorBounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point as `(x, y)` meters.
    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
        )
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &MercatorBounds) -> MercatorBounds {
        MercatorBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside valid range (-85.05112878 to 85.05112878)
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// Zoom level is outside valid range (1 to 15)
    InvalidZoom(u8),
    /// Tile index does not exist at this zoom level
    TileOutOfRange { x: u32, y: u32, zoom: u8 },
    /// Projected position lies outside the Mercator square
    OutOfWorld { x: f64, y: f64 },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
            CoordError::TileOutOfRange { x, y, zoom } => {
                write!(
                    f,
                    "Tile ({}, {}) does not exist at zoom {} (max index {})",
                    x,
                    y,
                    zoom,
                    tiles_per_axis(*zoom).saturating_sub(1)
                )
            }
            CoordError::OutOfWorld { x, y } => {
                write!(
                    f,
                    "Position ({:.1}, {:.1}) m lies outside the projected world (±{:.1} m)",
                    x, y, ORIGIN_SHIFT
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
