//! State shared between the stream worker and the viewport publisher.

use crate::coord::TileCoord;
use crate::mosaic::Mosaic;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Point in renderer world space, meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPoint {
    pub const ZERO: WorldPoint = WorldPoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Where the renderer should put the terrain patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Extent along x, y and the vertical scale
    pub scale: WorldPoint,
    /// Corner position relative to the session origin
    pub position: WorldPoint,
}

/// Everything the worker and publisher exchange.
///
/// Only reachable through [`SharedViewport::lock`].
#[derive(Debug, Clone, Default)]
pub struct ViewportState {
    /// Projected position of the world-space origin
    pub origin: WorldPoint,
    /// Tile the viewpoint is currently over
    pub target_tile: Option<TileCoord>,
    /// Tile of the most recently built mosaic
    pub last_built_tile: Option<TileCoord>,
    /// Most recently built mosaic
    pub mosaic: Option<Arc<Mosaic>>,
    /// True once the current mosaic has been applied by the renderer
    pub ready: bool,
}

impl ViewportState {
    pub fn new(origin: WorldPoint) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }

    /// Target that still needs a build, if any.
    pub fn pending_target(&self) -> Option<TileCoord> {
        match self.target_tile {
            Some(target) if self.last_built_tile != Some(target) => Some(target),
            _ => None,
        }
    }

    /// Installs a freshly built mosaic and marks it unapplied.
    pub fn install(&mut self, mosaic: Mosaic) -> Arc<Mosaic> {
        let mosaic = Arc::new(mosaic);
        self.last_built_tile = Some(mosaic.source_tile);
        self.mosaic = Some(Arc::clone(&mosaic));
        self.ready = false;
        mosaic
    }

    /// Lock-free copy for diagnostics.
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            origin: self.origin,
            target_tile: self.target_tile,
            last_built_tile: self.last_built_tile,
            mosaic_tile: self.mosaic.as_ref().map(|m| m.source_tile),
            ready: self.ready,
        }
    }
}

/// Point-in-time copy of [`ViewportState`] without the mosaic payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSnapshot {
    pub origin: WorldPoint,
    pub target_tile: Option<TileCoord>,
    pub last_built_tile: Option<TileCoord>,
    pub mosaic_tile: Option<TileCoord>,
    pub ready: bool,
}

/// Handle to the viewport state, cloned into each thread.
#[derive(Debug, Clone, Default)]
pub struct SharedViewport {
    inner: Arc<Mutex<ViewportState>>,
}

impl SharedViewport {
    pub fn new(origin: WorldPoint) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewportState::new(origin))),
        }
    }

    /// Locks the state. Keep the guard for constant-time field access only.
    pub fn lock(&self) -> MutexGuard<'_, ViewportState> {
        self.inner.lock()
    }

    pub fn snapshot(&self) -> ViewportSnapshot {
        self.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mosaic::HeightmapImage;
    use image::RgbImage;

    fn mosaic(tile: TileCoord) -> Mosaic {
        Mosaic {
            elevation: HeightmapImage::new(2, 2),
            landcover: RgbImage::new(2, 2),
            z0: 0.0,
            zscale: 250.0,
            source_tile: tile,
        }
    }

    #[test]
    fn test_pending_target() {
        let tile = TileCoord::new(1, 1, 3).unwrap();
        let mut state = ViewportState::new(WorldPoint::ZERO);
        assert_eq!(state.pending_target(), None);

        state.target_tile = Some(tile);
        assert_eq!(state.pending_target(), Some(tile));

        state.install(mosaic(tile));
        assert_eq!(state.pending_target(), None);
    }

    #[test]
    fn test_install_resets_ready() {
        let tile = TileCoord::new(2, 2, 3).unwrap();
        let mut state = ViewportState::new(WorldPoint::ZERO);
        state.ready = true;

        let installed = state.install(mosaic(tile));

        assert!(!state.ready);
        assert_eq!(state.last_built_tile, Some(tile));
        assert!(Arc::ptr_eq(state.mosaic.as_ref().unwrap(), &installed));
    }

    #[test]
    fn test_shared_snapshot() {
        let viewport = SharedViewport::new(WorldPoint::new(1.0, 2.0, 0.0));
        let tile = TileCoord::new(3, 3, 3).unwrap();
        viewport.lock().install(mosaic(tile));

        let snapshot = viewport.snapshot();
        assert_eq!(snapshot.origin.y, 2.0);
        assert_eq!(snapshot.mosaic_tile, Some(tile));
        assert!(!snapshot.ready);
    }
}
