//! Download command - pre-seed the tile cache for a zoom level.

use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use terrainlayer::coord::{tiles_per_axis, TileCoord};
use terrainlayer::tile::{TileKey, TileLayer};
use tracing::{info, warn};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the download command.
pub struct DownloadArgs {
    pub zoom: u8,
    pub x_range: Option<(u32, u32)>,
    pub y_range: Option<(u32, u32)>,
    pub force: bool,
    pub debug: bool,
    pub verbose: bool,
}

/// Run the download command.
pub fn run(args: DownloadArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.debug, args.verbose)?;
    runner.log_startup("download");

    // Validates the zoom level
    TileCoord::new(0, 0, args.zoom)?;
    let columns = tile_range("--x-range", args.x_range, args.zoom)?;
    let rows = tile_range("--y-range", args.y_range, args.zoom)?;

    let total = key_count(&columns, &rows);

    let store = runner.tile_store()?;
    println!("Seeding cache: {}", store.cache_dir().display());
    println!(
        "  Zoom {}: {} tiles ({} per layer){}",
        args.zoom,
        total,
        total / TileLayer::ALL.len() as u64,
        if args.force { ", forced refresh" } else { "" }
    );
    println!();

    let start = Instant::now();
    let failed = AtomicUsize::new(0);

    tile_keys(args.zoom, columns, rows).for_each(|key| {
        if let Err(e) = store.fetch(&key, args.force) {
            failed.fetch_add(1, Ordering::Relaxed);
            warn!(key = %key, error = %e, "Tile download failed");
            eprintln!("  failed {}: {}", key, e);
        }
    });

    let failed = failed.into_inner() as u64;
    let stats = store.stats();
    info!(
        tiles = total,
        failed = failed,
        elapsed_s = start.elapsed().as_secs_f64(),
        "Cache seeding finished"
    );

    println!();
    println!(
        "Done in {:.1}s: {} ok, {} failed",
        start.elapsed().as_secs_f64(),
        total - failed,
        failed
    );
    println!("  {}", stats);

    Ok(())
}

/// Every layer of every tile in the given block, generated lazily.
fn tile_keys(
    zoom: u8,
    columns: RangeInclusive<u32>,
    rows: RangeInclusive<u32>,
) -> impl ParallelIterator<Item = TileKey> {
    columns.into_par_iter().flat_map_iter(move |x| {
        rows.clone().flat_map(move |y| {
            TileLayer::ALL
                .into_iter()
                .map(move |layer| TileKey::new(layer, zoom, x, y))
        })
    })
}

fn key_count(columns: &RangeInclusive<u32>, rows: &RangeInclusive<u32>) -> u64 {
    let span = |r: &RangeInclusive<u32>| u64::from(r.end() - r.start()) + 1;
    span(columns) * span(rows) * TileLayer::ALL.len() as u64
}

/// Inclusive range of tile indices, or the whole axis when none is given.
fn tile_range(
    flag: &str,
    range: Option<(u32, u32)>,
    zoom: u8,
) -> Result<RangeInclusive<u32>, CliError> {
    let last = tiles_per_axis(zoom) - 1;
    match range {
        None => Ok(0..=last),
        Some((a, b)) if a <= b && b <= last => Ok(a..=b),
        Some((a, b)) => Err(CliError::Config(format!(
            "{} {} {} is not a valid range at zoom {} (0-{})",
            flag, a, b, zoom, last
        ))),
    }
}
