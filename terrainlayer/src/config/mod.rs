//! Configuration for terrainlayer.
//!
//! User settings live in `~/.terrainlayer/config.ini` and are loaded into a
//! [`ConfigFile`]. Runtime components take the narrower structs derived from
//! it ([`crate::mosaic::MosaicConfig`], [`crate::stream::StreamConfig`],
//! [`crate::provider::TileServers`]).
//!
//! # Example
//!
//! ```
//! use terrainlayer::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let mosaic = config.mosaic_config();
//! assert_eq!(mosaic.min_zscale, 250.0);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use file::{
    config_directory, config_file_path, CacheSettings, ConfigFile, ConfigFileError,
    DownloadSettings, LoggingSettings, ServerSettings, StreamSettings, TerrainSettings,
    DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_ELEVATION_LAYER, DEFAULT_ELEVATION_URL,
    DEFAULT_LANDCOVER_LAYER, DEFAULT_LANDCOVER_URL, DEFAULT_LOG_FILE_NAME,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_ZOOM,
};
