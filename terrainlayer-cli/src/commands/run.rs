//! Run command - headless streaming session with a simulated viewpoint.
//!
//! The viewpoint starts at the center of the start tile and moves in a
//! straight line; every mosaic the session applies is written to the output
//! directory by a [`FileRenderer`].

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use terrainlayer::coord::tile_size_meters;
use terrainlayer::stream::{TerrainSession, WorldPoint};
use tracing::info;

use super::common::{ensure_output_dir, resolve_tile, TileArgs};
use crate::error::CliError;
use crate::render::FileRenderer;
use crate::runner::CliRunner;

/// Arguments for the run command.
pub struct RunArgs {
    pub tile: TileArgs,
    pub output: PathBuf,
    /// Ground speed in meters per second
    pub speed: f64,
    /// Heading in degrees clockwise from north
    pub heading: f64,
    pub ticks: u32,
    pub tick_ms: u64,
    pub debug: bool,
    pub verbose: bool,
}

/// Run the run command.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.debug, args.verbose)?;
    runner.log_startup("run");
    let config = runner.config();

    let start_tile = resolve_tile(&args.tile, config)?;
    ensure_output_dir(&args.output)?;

    let builder = runner.mosaic_builder(false)?;
    let renderer = FileRenderer::new(args.output.clone());

    println!("Starting session at tile {}", start_tile);
    println!(
        "  Viewpoint: {:.1} m/s heading {:.0}°, {} ticks of {} ms",
        args.speed, args.heading, args.ticks, args.tick_ms
    );
    println!(
        "  Tile size: {:.1} m at zoom {}",
        tile_size_meters(start_tile.zoom),
        start_tile.zoom
    );
    println!();

    let mut session =
        TerrainSession::start(builder, renderer, start_tile, config.stream_config())?;

    let tick = Duration::from_millis(args.tick_ms);
    let step = velocity(args.speed, args.heading, tick);
    let mut position = WorldPoint::ZERO;
    let started = Instant::now();
    let mut result = Ok(());

    for n in 0..args.ticks {
        match session.on_tick(&position) {
            Ok(true) => {
                let snapshot = session.snapshot();
                if let Some(tile) = snapshot.mosaic_tile {
                    println!("  [{:>5}] applied mosaic around {}", n, tile);
                }
            }
            Ok(false) => {}
            Err(e) => {
                result = Err(CliError::Session(e));
                break;
            }
        }
        position.x += step.x;
        position.y += step.y;
        thread::sleep(tick);
    }

    session.shutdown();

    let snapshot = session.snapshot();
    let renderer = session.renderer();
    info!(
        frames = renderer.frames(),
        failures = renderer.failures(),
        elapsed_s = started.elapsed().as_secs_f64(),
        "Session finished"
    );

    println!();
    println!(
        "Session finished after {:.1}s: {} mosaics written, {} failed",
        started.elapsed().as_secs_f64(),
        renderer.frames(),
        renderer.failures()
    );
    if let Some(tile) = snapshot.target_tile {
        println!("  Final viewpoint tile: {}", tile);
    }
    println!("  Output: {}", args.output.display());

    result
}

/// Per-tick displacement for a heading measured clockwise from north.
///
/// World y grows southwards, so north is negative y.
fn velocity(speed: f64, heading_deg: f64, tick: Duration) -> WorldPoint {
    let distance = speed * tick.as_secs_f64();
    let heading = heading_deg.to_radians();
    WorldPoint::new(distance * heading.sin(), -distance * heading.cos(), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_north() {
        let v = velocity(100.0, 0.0, Duration::from_millis(500));
        assert!(v.x.abs() < 1e-9);
        assert!((v.y + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_east() {
        let v = velocity(10.0, 90.0, Duration::from_secs(1));
        assert!((v.x - 10.0).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
    }

    #[test]
    fn test_velocity_south() {
        let v = velocity(10.0, 180.0, Duration::from_secs(2));
        assert!((v.y - 20.0).abs() < 1e-9);
    }
}
