//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init` for inspecting
//! and creating the configuration file.

use clap::Subcommand;
use terrainlayer::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration (file values over defaults)
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init { force } => run_init(force),
    }
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    let path = config_file_path();
    println!("{}", path.display());
    if !path.exists() {
        println!("(file does not exist, defaults are in effect)");
    }
    Ok(())
}

/// Show the effective configuration.
fn run_show() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    println!("Configuration Settings");
    println!("======================");
    println!();
    println!("[terrain]");
    println!("  zoom             = {}", config.terrain.zoom);
    println!("  min_zscale       = {}", config.terrain.min_zscale);
    println!("  smoothing_sigma  = {}", config.terrain.smoothing_sigma);
    println!();
    println!("[servers]");
    println!("  elevation_url    = {}", config.servers.elevation_url);
    println!("  elevation_layer  = {}", config.servers.elevation_layer);
    println!("  landcover_url    = {}", config.servers.landcover_url);
    println!("  landcover_layer  = {}", config.servers.landcover_layer);
    println!();
    println!("[cache]");
    println!("  directory        = {}", config.cache.directory.display());
    println!();
    println!("[download]");
    println!("  timeout          = {}", config.download.timeout);
    println!();
    println!("[stream]");
    println!("  poll_interval_ms = {}", config.stream.poll_interval_ms);
    println!("  prime_on_start   = {}", config.stream.prime_on_start);
    println!();
    println!("[logging]");
    println!("  file             = {}", config.logging.file.display());

    Ok(())
}

/// Write the default configuration file.
fn run_init(force: bool) -> Result<(), CliError> {
    let path = config_file_path();

    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    ConfigFile::default().save_to(&path)?;
    println!("✓ Wrote default configuration: {}", path.display());

    Ok(())
}
