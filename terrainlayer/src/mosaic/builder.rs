//! Default mosaic generator backed by the tile store.

use crate::coord::TileCoord;
use crate::elevation;
use crate::mosaic::assemble::{
    encode_heightmap, normalize, resize_grid, resize_image, smooth, stitch_grids, stitch_images,
};
use crate::mosaic::neighborhood::neighborhood;
use crate::mosaic::{Mosaic, MosaicConfig, MosaicError, MosaicGenerator};
use crate::tile::{RasterTile, TileKey, TileLayer, TileStore};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Builds mosaics from the 18 tiles (9 per layer) around a center tile.
///
/// All tiles are fetched in parallel and joined before assembly; any
/// missing tile fails the whole build.
pub struct MosaicBuilder {
    store: Arc<TileStore>,
    config: MosaicConfig,
    force_refresh: bool,
}

impl MosaicBuilder {
    pub fn new(store: Arc<TileStore>, config: MosaicConfig) -> Self {
        Self {
            store,
            config,
            force_refresh: false,
        }
    }

    /// Bypass the cache and download every tile again.
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<TileStore> {
        &self.store
    }

    /// Fetches both layers of the neighborhood, ordered by layer, then
    /// column, then row.
    fn fetch_all(&self, center: &TileCoord) -> Result<Vec<RasterTile>, MosaicError> {
        let tiles = neighborhood(center)?;
        let keys: Vec<TileKey> = TileLayer::ALL
            .iter()
            .flat_map(|layer| {
                tiles
                    .iter()
                    .flatten()
                    .map(move |tile| TileKey::from_tile(*layer, tile))
            })
            .collect();

        keys.par_iter()
            .map(|key| self.store.fetch(key, self.force_refresh))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| MosaicError::IncompleteNeighborhood {
                center: *center,
                reason: format!("{} unavailable", e.key()),
                source: Some(e),
            })
    }
}

impl MosaicGenerator for MosaicBuilder {
    fn build(&self, center: &TileCoord) -> Result<Mosaic, MosaicError> {
        let start = Instant::now();
        let tiles = neighborhood(center)?;
        let fetched = self.fetch_all(center)?;
        debug!(
            center = %center,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Neighborhood fetched"
        );

        let (elevation_tiles, landcover_tiles) = fetched.split_at(9);

        let grids = std::array::from_fn(|col| {
            std::array::from_fn(|row| elevation::decode(&elevation_tiles[col * 3 + row]))
        });
        let stitched = stitch_grids(&tiles, &grids)?;
        let (normalized, z0, zscale) = normalize(&stitched, self.config.min_zscale);
        let smoothed = smooth(normalized, self.config.smoothing_sigma);
        let elevation = encode_heightmap(&resize_grid(&smoothed));

        let images = std::array::from_fn(|col| {
            std::array::from_fn(|row| landcover_tiles[col * 3 + row].image())
        });
        let landcover = resize_image(&stitch_images(&tiles, &images)?);

        info!(
            center = %center,
            z0 = z0,
            zscale = zscale,
            heightmap = ?elevation.dimensions(),
            texture = ?landcover.dimensions(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Mosaic built"
        );

        Ok(Mosaic {
            elevation,
            landcover,
            z0,
            zscale,
            source_tile: *center,
        })
    }
}
