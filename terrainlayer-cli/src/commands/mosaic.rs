//! Mosaic command - build one terrain mosaic and write it to disk.

use std::path::PathBuf;
use std::time::Instant;
use terrainlayer::mosaic::{neighborhood_bounds, MosaicGenerator};

use super::common::{ensure_output_dir, resolve_tile, TileArgs};
use crate::error::CliError;
use crate::render::write_images;
use crate::runner::CliRunner;

/// Arguments for the mosaic command.
pub struct MosaicArgs {
    pub tile: TileArgs,
    pub output: PathBuf,
    pub force: bool,
    pub debug: bool,
    pub verbose: bool,
}

/// Run the mosaic command.
pub fn run(args: MosaicArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.debug, args.verbose)?;
    runner.log_startup("mosaic");

    let center = resolve_tile(&args.tile, runner.config())?;
    let builder = runner.mosaic_builder(args.force)?;

    println!("Building mosaic around tile {}", center);
    let start = Instant::now();
    let mosaic = builder.build(&center)?;
    println!("Built in {:.2}s", start.elapsed().as_secs_f64());
    println!();

    ensure_output_dir(&args.output)?;
    let (elevation, landcover) =
        write_images(&args.output, "", &mosaic.elevation, &mosaic.landcover)?;

    let bounds = neighborhood_bounds(&center);
    let (hw, hh) = mosaic.elevation.dimensions();
    let (tw, th) = mosaic.landcover.dimensions();

    println!("✓ Heightmap: {} ({}×{}, 16-bit)", elevation.display(), hw, hh);
    println!("✓ Texture:   {} ({}×{})", landcover.display(), tw, th);
    println!("  z0:     {:.2} m", mosaic.z0);
    println!("  zscale: {:.2} m", mosaic.zscale);
    println!(
        "  bounds: x {:.1}..{:.1}, y {:.1}..{:.1} (EPSG:3857)",
        bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y
    );
    println!("  {}", builder.store().stats());

    Ok(())
}
