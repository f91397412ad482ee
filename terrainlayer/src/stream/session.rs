//! Terrain streaming session: worker plus publisher around one viewport.

use crate::coord::{tile_bounds, CoordError, TileCoord};
use crate::mosaic::MosaicGenerator;
use crate::stream::publisher::{Renderer, ViewportPublisher};
use crate::stream::state::{SharedViewport, ViewportSnapshot, WorldPoint};
use crate::stream::worker::{TileStreamWorker, WorkerState};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Default sleep between worker checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Streaming settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    /// Worker poll interval
    pub poll_interval: Duration,
    /// Build and apply the first mosaic before returning from `start`
    pub prime_on_start: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            prime_on_start: true,
        }
    }
}

/// Errors raised by a terrain session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Start tile or viewpoint is not a valid position
    #[error(transparent)]
    Coord(#[from] CoordError),

    /// The worker thread could not be spawned
    #[error("Failed to spawn tile stream worker: {0}")]
    Spawn(#[source] std::io::Error),
}

/// A running terrain stream.
///
/// The session owns the worker thread and the publisher. The host calls
/// [`TerrainSession::on_tick`] from its frame loop with the viewpoint in
/// world space; world space is centered on the start tile.
///
/// # Example
///
/// ```ignore
/// let mut session = TerrainSession::start(generator, renderer, start, StreamConfig::default())?;
/// loop {
///     session.on_tick(&camera_position)?;
/// }
/// ```
pub struct TerrainSession<R: Renderer> {
    viewport: SharedViewport,
    publisher: ViewportPublisher<R>,
    worker: TileStreamWorker,
}

impl<R: Renderer> TerrainSession<R> {
    /// Starts streaming around `start`.
    ///
    /// With `prime_on_start` the first mosaic is built on the calling thread
    /// and applied before the worker is spawned. A failed priming build is
    /// logged and left to the worker to retry.
    pub fn start(
        generator: Arc<dyn MosaicGenerator>,
        renderer: R,
        start: TileCoord,
        config: StreamConfig,
    ) -> Result<Self, SessionError> {
        let start = TileCoord::new(start.x, start.y, start.zoom)?;
        let viewport = SharedViewport::new(origin_of(&start));
        viewport.lock().target_tile = Some(start);

        let mut publisher = ViewportPublisher::new(viewport.clone(), renderer, start.zoom);

        if config.prime_on_start {
            match generator.build(&start) {
                Ok(mosaic) => {
                    viewport.lock().install(mosaic);
                    publisher.publish_if_ready(true);
                }
                Err(e) => warn!(tile = %start, error = %e, "Initial mosaic build failed"),
            }
        }

        let worker =
            TileStreamWorker::start(generator, viewport.clone(), config.poll_interval)
                .map_err(SessionError::Spawn)?;

        info!(tile = %start, zoom = start.zoom, "Terrain session started");

        Ok(Self {
            viewport,
            publisher,
            worker,
        })
    }

    /// Per-frame hook, see [`ViewportPublisher::on_tick`].
    pub fn on_tick(&mut self, position: &WorldPoint) -> Result<bool, SessionError> {
        Ok(self.publisher.on_tick(position)?)
    }

    /// Applies the current mosaic; `force` re-applies it even if applied.
    pub fn publish(&mut self, force: bool) -> bool {
        self.publisher.publish_if_ready(force)
    }

    /// Re-centers world space on `tile` and retargets the worker there.
    ///
    /// The current mosaic is marked unapplied so the next publish places it
    /// against the new origin.
    pub fn reset_origin(&mut self, tile: TileCoord) -> Result<(), SessionError> {
        let tile = TileCoord::new(tile.x, tile.y, self.publisher.zoom())?;
        {
            let mut state = self.viewport.lock();
            state.origin = origin_of(&tile);
            state.target_tile = Some(tile);
            state.ready = false;
        }
        info!(tile = %tile, "Session origin reset");
        Ok(())
    }

    /// Stops the worker. Non-blocking and idempotent.
    pub fn stop(&self) {
        self.worker.stop();
    }

    /// Stops the worker and waits for it to exit.
    pub fn shutdown(&mut self) {
        self.worker.stop();
        self.worker.join();
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_running()
    }

    pub fn worker_state(&self) -> WorkerState {
        self.worker.state()
    }

    /// Copy of the shared state for diagnostics.
    pub fn snapshot(&self) -> ViewportSnapshot {
        self.viewport.snapshot()
    }

    pub fn origin(&self) -> WorldPoint {
        self.viewport.lock().origin
    }

    pub fn zoom(&self) -> u8 {
        self.publisher.zoom()
    }

    pub fn renderer(&self) -> &R {
        self.publisher.renderer()
    }
}

/// World-space origin for a start tile: the center of its bounds at z = 0.
pub fn origin_of(tile: &TileCoord) -> WorldPoint {
    let (x, y) = tile_bounds(tile).center();
    WorldPoint::new(x, y, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mosaic::{HeightmapImage, Mosaic, MosaicError};
    use crate::stream::publisher::tests::CountingRenderer;
    use image::RgbImage;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Instant;

    struct StubGenerator {
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl StubGenerator {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(fail),
            })
        }
    }

    impl MosaicGenerator for StubGenerator {
        fn build(&self, center: &TileCoord) -> Result<Mosaic, MosaicError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(MosaicError::IncompleteNeighborhood {
                    center: *center,
                    reason: "offline".to_string(),
                    source: None,
                });
            }
            Ok(Mosaic {
                elevation: HeightmapImage::new(2, 2),
                landcover: RgbImage::new(2, 2),
                z0: 10.0,
                zscale: 250.0,
                source_tile: *center,
            })
        }
    }

    fn config(prime: bool) -> StreamConfig {
        StreamConfig {
            poll_interval: Duration::from_millis(5),
            prime_on_start: prime,
        }
    }

    fn wait_for_publish(session: &mut TerrainSession<CountingRenderer>) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if session.publish(false) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_prime_applies_first_mosaic() {
        let start = TileCoord::new(100, 100, 14).unwrap();
        let generator = StubGenerator::new(false);

        let mut session = TerrainSession::start(
            generator.clone(),
            CountingRenderer::default(),
            start,
            config(true),
        )
        .unwrap();

        assert_eq!(session.renderer().regenerations, 1);
        let snapshot = session.snapshot();
        assert!(snapshot.ready);
        assert_eq!(snapshot.last_built_tile, Some(start));
        assert_eq!(snapshot.origin, origin_of(&start));
        session.shutdown();

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_without_prime_worker_builds() {
        let start = TileCoord::new(100, 100, 14).unwrap();
        let mut session = TerrainSession::start(
            StubGenerator::new(false),
            CountingRenderer::default(),
            start,
            config(false),
        )
        .unwrap();

        assert_eq!(session.renderer().regenerations, 0);
        assert!(wait_for_publish(&mut session));
        assert_eq!(session.renderer().regenerations, 1);
    }

    #[test]
    fn test_failed_prime_still_starts() {
        let start = TileCoord::new(100, 100, 14).unwrap();
        let session = TerrainSession::start(
            StubGenerator::new(true),
            CountingRenderer::default(),
            start,
            config(true),
        )
        .unwrap();

        assert!(session.is_running());
        assert_eq!(session.snapshot().mosaic_tile, None);
    }

    #[test]
    fn test_invalid_zoom_rejected() {
        let start = TileCoord {
            x: 0,
            y: 0,
            zoom: 16,
        };
        let result = TerrainSession::start(
            StubGenerator::new(false),
            CountingRenderer::default(),
            start,
            config(false),
        );

        assert!(matches!(
            result,
            Err(SessionError::Coord(CoordError::InvalidZoom(16)))
        ));
    }

    #[test]
    fn test_reset_origin() {
        let start = TileCoord::new(100, 100, 14).unwrap();
        let mut session = TerrainSession::start(
            StubGenerator::new(false),
            CountingRenderer::default(),
            start,
            config(true),
        )
        .unwrap();

        let other = TileCoord::new(200, 50, 14).unwrap();
        session.reset_origin(other).unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.origin, origin_of(&other));
        assert_eq!(snapshot.target_tile, Some(other));
        assert!(wait_for_publish(&mut session));
    }

    #[test]
    fn test_stop() {
        let start = TileCoord::new(100, 100, 14).unwrap();
        let mut session = TerrainSession::start(
            StubGenerator::new(false),
            CountingRenderer::default(),
            start,
            config(false),
        )
        .unwrap();

        session.stop();
        session.stop();
        session.shutdown();

        assert!(!session.is_running());
        assert_eq!(session.worker_state(), WorkerState::Stopped);
    }
}
