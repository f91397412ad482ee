//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Mosaic settings
    pub terrain: TerrainSettings,
    /// Tile server settings
    pub servers: ServerSettings,
    /// Cache settings
    pub cache: CacheSettings,
    /// Download settings
    pub download: DownloadSettings,
    /// Streaming worker settings
    pub stream: StreamSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Terrain mosaic configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSettings {
    /// Zoom level tiles are streamed at (1-15)
    pub zoom: u8,
    /// Floor for the vertical scale of a mosaic, in meters
    pub min_zscale: f64,
    /// Gaussian sigma applied to the heightmap; 0 disables smoothing
    pub smoothing_sigma: f32,
}

/// Tile server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub elevation_url: String,
    pub elevation_layer: String,
    pub landcover_url: String,
    pub landcover_layer: String,
}

/// Cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Cache root directory
    pub directory: PathBuf,
}

/// Download configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Timeout in seconds for HTTP requests.
    pub timeout: u64,
}

/// Streaming configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSettings {
    /// Milliseconds the worker sleeps between checks
    pub poll_interval_ms: u64,
    /// Build the first mosaic before the session returns
    pub prime_on_start: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
