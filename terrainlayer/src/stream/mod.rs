//! Viewpoint-driven terrain streaming.
//!
//! Two threads share one [`SharedViewport`]:
//!
//! ```text
//!  host frame loop                         terrain-stream thread
//!  ───────────────                         ─────────────────────
//!  on_tick(position)                       loop {
//!    target_tile = tile under position ──▶   target != last_built?
//!    publish_if_ready()                        build (lock released)
//!      ready? skip                             install mosaic, ready = false
//!      snapshot mosaic ◀──────────────────   else park(poll_interval)
//!      renderer calls (lock released)      }
//!      ready = true if still current
//! ```

mod publisher;
mod session;
mod state;
mod worker;

pub use publisher::{compute_placement, Renderer, ViewportPublisher};
pub use session::{origin_of, SessionError, StreamConfig, TerrainSession, DEFAULT_POLL_INTERVAL};
pub use state::{Placement, SharedViewport, ViewportSnapshot, ViewportState, WorldPoint};
pub use worker::{TileStreamWorker, WorkerState};
