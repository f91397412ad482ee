//! Background mosaic builder thread.
//!
//! The worker polls the shared viewport for a target tile that differs from
//! the last one built. Builds run with the lock released; the result is
//! installed under the lock and marked unapplied for the publisher.

use crate::mosaic::MosaicGenerator;
use crate::stream::state::SharedViewport;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Lifecycle of the worker thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    /// Waiting for a new target
    Idle = 0,
    /// Building a mosaic
    Generating = 1,
    /// Stop requested, thread not yet finished
    Stopping = 2,
    /// Thread has exited
    Stopped = 3,
}

impl WorkerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => WorkerState::Idle,
            1 => WorkerState::Generating,
            2 => WorkerState::Stopping,
            _ => WorkerState::Stopped,
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Idle => "idle",
            WorkerState::Generating => "generating",
            WorkerState::Stopping => "stopping",
            WorkerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Owns the builder thread.
///
/// Dropping the worker stops the thread and waits for it to finish, which
/// may take as long as an in-flight build.
pub struct TileStreamWorker {
    /// Handle to the worker thread
    thread_handle: Option<JoinHandle<()>>,
    /// Shutdown signal
    shutdown: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
}

impl TileStreamWorker {
    /// Spawns the worker thread.
    ///
    /// # Arguments
    ///
    /// * `generator` - Builds mosaics for target tiles
    /// * `viewport` - State shared with the publisher
    /// * `poll_interval` - Sleep between checks for a new target
    pub fn start(
        generator: Arc<dyn MosaicGenerator>,
        viewport: SharedViewport,
        poll_interval: Duration,
    ) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let state = Arc::new(AtomicU8::new(WorkerState::Idle as u8));

        let thread_handle = {
            let shutdown = Arc::clone(&shutdown);
            let state = Arc::clone(&state);
            thread::Builder::new()
                .name("terrain-stream".to_string())
                .spawn(move || {
                    Self::run_loop(generator, viewport, poll_interval, shutdown, &state);
                    state.store(WorkerState::Stopped as u8, Ordering::Release);
                })?
        };

        info!(
            poll_interval_ms = poll_interval.as_millis() as u64,
            "Tile stream worker started"
        );

        Ok(Self {
            thread_handle: Some(thread_handle),
            shutdown,
            state,
        })
    }

    /// The main worker loop.
    fn run_loop(
        generator: Arc<dyn MosaicGenerator>,
        viewport: SharedViewport,
        poll_interval: Duration,
        shutdown: Arc<AtomicBool>,
        state: &AtomicU8,
    ) {
        loop {
            if shutdown.load(Ordering::Acquire) {
                debug!("Tile stream worker received shutdown signal");
                break;
            }

            let pending = viewport.lock().pending_target();
            let Some(target) = pending else {
                thread::park_timeout(poll_interval);
                continue;
            };

            state.store(WorkerState::Generating as u8, Ordering::Release);
            let start = Instant::now();
            let result = generator.build(&target);
            state.store(WorkerState::Idle as u8, Ordering::Release);

            match result {
                Ok(mosaic) => {
                    let z0 = mosaic.z0;
                    let zscale = mosaic.zscale;
                    viewport.lock().install(mosaic);
                    info!(
                        tile = %target,
                        z0 = z0,
                        zscale = zscale,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Mosaic published"
                    );
                    // Check straight away for a target that moved mid-build
                }
                Err(e) => {
                    warn!(tile = %target, error = %e, "Mosaic build failed, will retry");
                    thread::park_timeout(poll_interval);
                }
            }
        }

        debug!("Tile stream worker stopped");
    }

    /// Signal the worker to stop and wake it if it is sleeping.
    ///
    /// Non-blocking and idempotent. An in-flight build finishes first.
    pub fn stop(&self) {
        if self.shutdown.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(handle) = &self.thread_handle {
            handle.thread().unpark();
        }
    }

    /// Wait for the worker thread to finish.
    pub fn join(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if let Err(e) = handle.join() {
                warn!("Tile stream worker thread panicked: {:?}", e);
            }
        }
        self.state.store(WorkerState::Stopped as u8, Ordering::Release);
    }

    /// Check if the worker thread is still running.
    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WorkerState {
        let state = WorkerState::from_u8(self.state.load(Ordering::Acquire));
        if state != WorkerState::Stopped && self.shutdown.load(Ordering::Acquire) {
            WorkerState::Stopping
        } else {
            state
        }
    }
}

impl Drop for TileStreamWorker {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use crate::mosaic::{HeightmapImage, Mosaic, MosaicError};
    use crate::stream::state::WorldPoint;
    use image::RgbImage;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// Generator recording every requested tile.
    struct RecordingGenerator {
        builds: Mutex<Vec<TileCoord>>,
        delay: Duration,
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl RecordingGenerator {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                builds: Mutex::new(Vec::new()),
                delay,
                fail: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            })
        }

        fn builds(&self) -> Vec<TileCoord> {
            self.builds.lock().unwrap().clone()
        }
    }

    impl MosaicGenerator for RecordingGenerator {
        fn build(&self, center: &TileCoord) -> Result<Mosaic, MosaicError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.delay);
            if self.fail.load(Ordering::SeqCst) {
                return Err(MosaicError::IncompleteNeighborhood {
                    center: *center,
                    reason: "offline".to_string(),
                    source: None,
                });
            }
            self.builds.lock().unwrap().push(*center);
            Ok(Mosaic {
                elevation: HeightmapImage::new(1, 1),
                landcover: RgbImage::new(1, 1),
                z0: 0.0,
                zscale: 250.0,
                source_tile: *center,
            })
        }
    }

    fn tile(x: u32) -> TileCoord {
        TileCoord::new(x, 100, 14).unwrap()
    }

    fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        condition()
    }

    #[test]
    fn test_builds_pending_target() {
        let generator = RecordingGenerator::new(Duration::ZERO);
        let viewport = SharedViewport::new(WorldPoint::ZERO);
        viewport.lock().target_tile = Some(tile(100));

        let worker =
            TileStreamWorker::start(generator.clone(), viewport.clone(), Duration::from_millis(10))
                .unwrap();

        assert!(wait_until(Duration::from_secs(2), || viewport
            .lock()
            .mosaic
            .is_some()));
        let state = viewport.lock();
        assert_eq!(state.last_built_tile, Some(tile(100)));
        assert!(!state.ready);
        drop(state);
        drop(worker);

        assert_eq!(generator.builds(), vec![tile(100)]);
    }

    #[test]
    fn test_no_rebuild_for_same_target() {
        let generator = RecordingGenerator::new(Duration::ZERO);
        let viewport = SharedViewport::new(WorldPoint::ZERO);
        viewport.lock().target_tile = Some(tile(5));

        let worker =
            TileStreamWorker::start(generator.clone(), viewport.clone(), Duration::from_millis(5))
                .unwrap();
        assert!(wait_until(Duration::from_secs(2), || !generator
            .builds()
            .is_empty()));
        thread::sleep(Duration::from_millis(50));
        drop(worker);

        assert_eq!(generator.builds().len(), 1);
    }

    #[test]
    fn test_targets_coalesce_during_build() {
        let generator = RecordingGenerator::new(Duration::from_millis(150));
        let viewport = SharedViewport::new(WorldPoint::ZERO);
        viewport.lock().target_tile = Some(tile(1));

        let worker =
            TileStreamWorker::start(generator.clone(), viewport.clone(), Duration::from_millis(5))
                .unwrap();

        assert!(wait_until(Duration::from_secs(2), || worker.state()
            == WorkerState::Generating));
        for x in 2..=5 {
            viewport.lock().target_tile = Some(tile(x));
        }

        assert!(wait_until(Duration::from_secs(3), || viewport
            .lock()
            .last_built_tile
            == Some(tile(5))));
        drop(worker);

        assert_eq!(generator.builds(), vec![tile(1), tile(5)]);
    }

    #[test]
    fn test_failed_build_keeps_previous_mosaic_and_retries() {
        let generator = RecordingGenerator::new(Duration::ZERO);
        let viewport = SharedViewport::new(WorldPoint::ZERO);
        viewport.lock().target_tile = Some(tile(1));

        let worker =
            TileStreamWorker::start(generator.clone(), viewport.clone(), Duration::from_millis(5))
                .unwrap();
        assert!(wait_until(Duration::from_secs(2), || viewport
            .lock()
            .last_built_tile
            == Some(tile(1))));

        generator.fail.store(true, Ordering::SeqCst);
        viewport.lock().target_tile = Some(tile(2));
        let calls_before = generator.calls.load(Ordering::SeqCst);
        assert!(wait_until(Duration::from_secs(2), || generator
            .calls
            .load(Ordering::SeqCst)
            >= calls_before + 2));

        {
            let state = viewport.lock();
            assert_eq!(state.mosaic.as_ref().unwrap().source_tile, tile(1));
            assert_eq!(state.last_built_tile, Some(tile(1)));
        }

        generator.fail.store(false, Ordering::SeqCst);
        assert!(wait_until(Duration::from_secs(2), || viewport
            .lock()
            .last_built_tile
            == Some(tile(2))));
        drop(worker);
    }

    #[test]
    fn test_stop_is_prompt_and_idempotent() {
        let generator = RecordingGenerator::new(Duration::ZERO);
        let viewport = SharedViewport::new(WorldPoint::ZERO);

        // Long poll interval: stop must unpark rather than wait it out
        let mut worker =
            TileStreamWorker::start(generator, viewport, Duration::from_secs(30)).unwrap();
        assert!(worker.is_running());

        let start = Instant::now();
        worker.stop();
        worker.stop();
        assert!(matches!(
            worker.state(),
            WorkerState::Stopping | WorkerState::Stopped
        ));
        worker.join();

        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(!worker.is_running());
        assert_eq!(worker.state(), WorkerState::Stopped);
    }

    #[test]
    fn test_stop_during_build_starts_no_more_builds() {
        let generator = RecordingGenerator::new(Duration::from_millis(60));
        let viewport = SharedViewport::new(WorldPoint::ZERO);
        let poll = Duration::from_millis(20);

        let mut worker =
            TileStreamWorker::start(generator.clone(), viewport.clone(), poll).unwrap();
        viewport.lock().target_tile = Some(tile(1));

        let deadline = Instant::now() + Duration::from_secs(2);
        while generator.calls.load(Ordering::SeqCst) == 0 {
            assert!(Instant::now() < deadline, "build never started");
            thread::sleep(Duration::from_millis(1));
        }
        worker.stop();

        // Keep retargeting for well over one poll interval
        let window_end = Instant::now() + Duration::from_millis(220);
        let mut x = 2;
        while Instant::now() < window_end {
            viewport.lock().target_tile = Some(tile(x));
            x += 1;
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        worker.join();
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(worker.state(), WorkerState::Stopped);
    }
}
