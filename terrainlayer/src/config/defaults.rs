//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::settings::*;

/// Default zoom level for streamed tiles.
pub const DEFAULT_ZOOM: u8 = 14;

/// Default Terrarium elevation server.
pub const DEFAULT_ELEVATION_URL: &str = "https://s3.amazonaws.com/elevation-tiles-prod";

/// Default path segment of the elevation layer.
pub const DEFAULT_ELEVATION_LAYER: &str = "terrarium";

/// Default landcover server.
pub const DEFAULT_LANDCOVER_URL: &str = "https://tiles.stadiamaps.com/tiles";

/// Default path segment of the landcover layer.
pub const DEFAULT_LANDCOVER_LAYER: &str = "stamen_terrain_background";

/// Default HTTP timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = crate::provider::DEFAULT_TIMEOUT_SECS;

/// Default worker poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default name of the log file inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "terrainlayer.log";

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            terrain: TerrainSettings {
                zoom: DEFAULT_ZOOM,
                min_zscale: crate::mosaic::DEFAULT_MIN_ZSCALE,
                smoothing_sigma: crate::mosaic::DEFAULT_SMOOTHING_SIGMA,
            },
            servers: ServerSettings {
                elevation_url: DEFAULT_ELEVATION_URL.to_string(),
                elevation_layer: DEFAULT_ELEVATION_LAYER.to_string(),
                landcover_url: DEFAULT_LANDCOVER_URL.to_string(),
                landcover_layer: DEFAULT_LANDCOVER_LAYER.to_string(),
            },
            cache: CacheSettings {
                directory: config_dir.join("cache"),
            },
            download: DownloadSettings {
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            },
            stream: StreamSettings {
                poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
                prime_on_start: true,
            },
            logging: LoggingSettings {
                file: config_dir.join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
