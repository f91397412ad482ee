//! Common types and utilities shared across CLI commands.

use clap::Args;
use std::path::Path;
use terrainlayer::config::ConfigFile;
use terrainlayer::coord::{to_tile_coords, TileCoord};

use crate::error::CliError;

/// Tile selection shared by commands that need a center tile.
///
/// Either `--x`/`--y` or `--lat`/`--lon` must be given.
#[derive(Debug, Clone, Default, Args)]
pub struct TileArgs {
    /// Tile column
    #[arg(long, requires = "y", conflicts_with_all = ["lat", "lon"])]
    pub x: Option<u32>,

    /// Tile row, counted from the north
    #[arg(long, requires = "x")]
    pub y: Option<u32>,

    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Zoom level, 1-15 (default: [terrain] zoom from config.ini)
    #[arg(long)]
    pub zoom: Option<u8>,
}

/// Resolve the tile named by the arguments, using the configured zoom when
/// none is given.
pub fn resolve_tile(args: &TileArgs, config: &ConfigFile) -> Result<TileCoord, CliError> {
    let zoom = args.zoom.unwrap_or(config.terrain.zoom);

    match (args.x, args.y, args.lat, args.lon) {
        (Some(x), Some(y), _, _) => Ok(TileCoord::new(x, y, zoom)?),
        (_, _, Some(lat), Some(lon)) => Ok(to_tile_coords(lat, lon, zoom)?),
        _ => Err(CliError::Config(
            "a tile is required: pass --x and --y, or --lat and --lon".to_string(),
        )),
    }
}

/// Create the output directory if it doesn't exist.
pub fn ensure_output_dir(path: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(path).map_err(|error| CliError::OutputDir {
        path: path.to_path_buf(),
        error,
    })
}
