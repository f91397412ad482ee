//! Hands built mosaics to the renderer on the consumer's own thread.

use crate::coord::{meters_to_tile, CoordError, TileCoord, ORIGIN_SHIFT};
use crate::mosaic::{neighborhood_bounds, HeightmapImage, Mosaic};
use crate::stream::state::{Placement, SharedViewport, WorldPoint};
use image::RgbImage;
use std::sync::Arc;
use tracing::debug;

/// The consumer of finished mosaics, usually a terrain node in a 3-D scene.
///
/// Called only from the thread driving the publisher, never with the
/// viewport lock held.
pub trait Renderer {
    /// Replaces the heightmap.
    fn load_heightmap(&mut self, heightmap: &HeightmapImage);

    /// Replaces the color texture.
    fn load_texture(&mut self, texture: &RgbImage);

    /// Moves and scales the terrain patch.
    fn set_placement(&mut self, placement: &Placement);

    /// Rebuilds geometry after the calls above.
    fn regenerate(&mut self);
}

/// Computes where a mosaic sits relative to the session origin.
///
/// World y mirrors projected y (it grows southwards, like tile rows), so the
/// northern edge of the patch lands at `-max_y`.
pub fn compute_placement(mosaic: &Mosaic, origin: &WorldPoint) -> Placement {
    let bounds = neighborhood_bounds(&mosaic.source_tile);
    let min_x = bounds.min_x - origin.x;
    let min_y = bounds.min_y - origin.y;
    let max_x = bounds.max_x - origin.x;
    let max_y = bounds.max_y - origin.y;

    Placement {
        scale: WorldPoint::new(max_x - min_x, max_y - min_y, mosaic.zscale),
        position: WorldPoint::new(min_x, -max_y, mosaic.z0 - origin.z),
    }
}

/// Tracks the viewpoint and applies new mosaics to a [`Renderer`].
///
/// Driven by the host's frame loop through [`ViewportPublisher::on_tick`].
/// The viewport lock is held only to read or write fields; all renderer
/// work happens after it is released.
pub struct ViewportPublisher<R: Renderer> {
    viewport: SharedViewport,
    renderer: R,
    zoom: u8,
}

impl<R: Renderer> ViewportPublisher<R> {
    pub fn new(viewport: SharedViewport, renderer: R, zoom: u8) -> Self {
        Self {
            viewport,
            renderer,
            zoom,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Tile under a world-space position.
    ///
    /// Easting wraps across the antimeridian the same way tile neighbors do;
    /// northing past the projection limit is an error.
    pub fn tile_at(&self, position: &WorldPoint) -> Result<TileCoord, CoordError> {
        let origin = self.viewport.lock().origin;
        let mx = (origin.x + position.x + ORIGIN_SHIFT).rem_euclid(2.0 * ORIGIN_SHIFT)
            - ORIGIN_SHIFT;
        let my = origin.y - position.y;
        meters_to_tile(mx, my, self.zoom)
    }

    /// Per-frame hook: retargets the worker, then publishes if a new mosaic
    /// is waiting.
    ///
    /// Returns whether the renderer was updated.
    pub fn on_tick(&mut self, position: &WorldPoint) -> Result<bool, CoordError> {
        let target = self.tile_at(position)?;
        {
            let mut state = self.viewport.lock();
            if state.target_tile != Some(target) {
                debug!(tile = %target, "Viewpoint entered new tile");
                state.target_tile = Some(target);
            }
        }
        Ok(self.publish_if_ready(false))
    }

    /// Applies the current mosaic unless it has been applied already.
    ///
    /// `force` re-applies an already applied mosaic. Returns whether the
    /// renderer was updated.
    pub fn publish_if_ready(&mut self, force: bool) -> bool {
        let (mosaic, origin) = {
            let state = self.viewport.lock();
            if state.ready && !force {
                return false;
            }
            match &state.mosaic {
                Some(mosaic) => (Arc::clone(mosaic), state.origin),
                None => return false,
            }
        };

        let placement = compute_placement(&mosaic, &origin);
        self.renderer.load_heightmap(&mosaic.elevation);
        self.renderer.load_texture(&mosaic.landcover);
        self.renderer.set_placement(&placement);
        self.renderer.regenerate();

        let mut state = self.viewport.lock();
        let still_current = state
            .mosaic
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &mosaic));
        if still_current && state.origin == origin {
            state.ready = true;
        }
        drop(state);

        debug!(
            tile = %mosaic.source_tile,
            still_current = still_current,
            "Mosaic applied"
        );
        true
    }
}
