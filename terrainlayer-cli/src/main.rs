//! TerrainLayer CLI - Command-line interface
//!
//! This binary provides a command-line interface to the TerrainLayer library.

mod commands;
mod error;
mod render;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::common::TileArgs;
use commands::config::ConfigCommands;

#[derive(Parser)]
#[command(name = "terrainlayer")]
#[command(version = terrainlayer::VERSION)]
#[command(about = "Stream elevation and landcover tiles into terrain mosaics", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Echo log output to stdout
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download tiles of both layers into the cache
    Download {
        /// Zoom level, 1-15
        zoom: u8,

        /// First and last tile column (default: all columns)
        #[arg(long, num_args = 2, value_names = ["FIRST", "LAST"])]
        x_range: Option<Vec<u32>>,

        /// First and last tile row (default: all rows)
        #[arg(long, num_args = 2, value_names = ["FIRST", "LAST"])]
        y_range: Option<Vec<u32>>,

        /// Download again even if the tile is cached
        #[arg(long)]
        force: bool,
    },

    /// Build the mosaic around one tile and write it as PNG files
    Mosaic {
        #[command(flatten)]
        tile: TileArgs,

        /// Output directory for elevation.png and landcover.png
        #[arg(long)]
        output: PathBuf,

        /// Download every tile again even if cached
        #[arg(long)]
        force: bool,
    },

    /// Run a headless streaming session with a moving viewpoint
    Run {
        #[command(flatten)]
        tile: TileArgs,

        /// Output directory for the applied mosaics
        #[arg(long)]
        output: PathBuf,

        /// Viewpoint speed in meters per second
        #[arg(long, default_value = "250")]
        speed: f64,

        /// Viewpoint heading in degrees clockwise from north
        #[arg(long, default_value = "90", allow_negative_numbers = true)]
        heading: f64,

        /// Number of frames to simulate
        #[arg(long, default_value = "600")]
        ticks: u32,

        /// Milliseconds between frames
        #[arg(long, default_value = "100")]
        tick_ms: u64,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    let (debug, verbose) = (cli.debug, cli.verbose);

    let result = match cli.command {
        Commands::Download {
            zoom,
            x_range,
            y_range,
            force,
        } => commands::download::run(commands::download::DownloadArgs {
            zoom,
            x_range: x_range.map(pair),
            y_range: y_range.map(pair),
            force,
            debug,
            verbose,
        }),
        Commands::Mosaic {
            tile,
            output,
            force,
        } => commands::mosaic::run(commands::mosaic::MosaicArgs {
            tile,
            output,
            force,
            debug,
            verbose,
        }),
        Commands::Run {
            tile,
            output,
            speed,
            heading,
            ticks,
            tick_ms,
        } => commands::run::run(commands::run::RunArgs {
            tile,
            output,
            speed,
            heading,
            ticks,
            tick_ms,
            debug,
            verbose,
        }),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}

/// First and last value of a range flag; clap passes exactly two.
fn pair(values: Vec<u32>) -> (u32, u32) {
    match values.as_slice() {
        [first, .., last] => (*first, *last),
        [only] => (*only, *only),
        [] => (0, 0),
    }
}
