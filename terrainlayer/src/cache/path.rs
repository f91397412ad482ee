//! Cache path construction and filename handling.

use crate::coord::TileCoord;
use crate::tile::TileLayer;
use std::path::{Path, PathBuf};

/// Construct the full path for a cached tile image.
///
/// Creates a hierarchical path structure:
/// ```text
/// <cache_dir>/<layer>/<zoom>/<x>/<y>.png
/// ```
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use terrainlayer::cache::cache_path;
/// use terrainlayer::coord::TileCoord;
/// use terrainlayer::tile::TileLayer;
///
/// let cache_dir = PathBuf::from("/cache");
/// let tile = TileCoord { x: 100, y: 200, zoom: 14 };
/// let path = cache_path(&cache_dir, TileLayer::Elevation, &tile);
///
/// assert_eq!(path, PathBuf::from("/cache/terrarium/14/100/200.png"));
/// ```
pub fn cache_path(cache_dir: &Path, layer: TileLayer, tile: &TileCoord) -> PathBuf {
    column_directory(cache_dir, layer, tile).join(format!("{}.png", tile.y))
}

/// Get the directory holding every cached row of one tile column.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use terrainlayer::cache::column_directory;
/// use terrainlayer::coord::TileCoord;
/// use terrainlayer::tile::TileLayer;
///
/// let tile = TileCoord { x: 100, y: 200, zoom: 14 };
/// let dir = column_directory(&PathBuf::from("/cache"), TileLayer::Landcover, &tile);
///
/// assert_eq!(dir, PathBuf::from("/cache/terrain-background/14/100"));
/// ```
pub fn column_directory(cache_dir: &Path, layer: TileLayer, tile: &TileCoord) -> PathBuf {
    layer_directory(cache_dir, layer)
        .join(tile.zoom.to_string())
        .join(tile.x.to_string())
}

/// Get the directory holding all tiles of one layer.
pub fn layer_directory(cache_dir: &Path, layer: TileLayer) -> PathBuf {
    cache_dir.join(layer.cache_dir_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_elevation() {
        let cache_dir = PathBuf::from("/home/user/.terrainlayer/cache");
        let tile = TileCoord {
            x: 8800,
            y: 5400,
            zoom: 14,
        };

        let path = cache_path(&cache_dir, TileLayer::Elevation, &tile);

        assert_eq!(
            path,
            PathBuf::from("/home/user/.terrainlayer/cache/terrarium/14/8800/5400.png")
        );
    }

    #[test]
    fn test_cache_path_layers_differ() {
        let cache_dir = PathBuf::from("/cache");
        let tile = TileCoord {
            x: 1,
            y: 2,
            zoom: 3,
        };

        let elevation = cache_path(&cache_dir, TileLayer::Elevation, &tile);
        let landcover = cache_path(&cache_dir, TileLayer::Landcover, &tile);

        assert_ne!(elevation, landcover);
        assert_eq!(
            landcover,
            PathBuf::from("/cache/terrain-background/3/1/2.png")
        );
    }

    #[test]
    fn test_cache_path_x_and_y_not_swapped() {
        let cache_dir = PathBuf::from("/cache");
        let a = TileCoord {
            x: 1,
            y: 2,
            zoom: 5,
        };
        let b = TileCoord {
            x: 2,
            y: 1,
            zoom: 5,
        };

        assert_ne!(
            cache_path(&cache_dir, TileLayer::Elevation, &a),
            cache_path(&cache_dir, TileLayer::Elevation, &b)
        );
    }

    #[test]
    fn test_layer_directory() {
        let dir = layer_directory(&PathBuf::from("/cache"), TileLayer::Elevation);
        assert_eq!(dir, PathBuf::from("/cache/terrarium"));
    }
}
