//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and construction of
//! the tile pipeline to reduce duplication across command handlers.

use crate::error::CliError;
use std::path::Path;
use std::sync::Arc;
use terrainlayer::cache::DiskCache;
use terrainlayer::config::{ConfigFile, DEFAULT_LOG_FILE_NAME};
use terrainlayer::logging::{init_logging, LoggingGuard};
use terrainlayer::mosaic::MosaicBuilder;
use terrainlayer::provider::{HttpTileProvider, ReqwestClient};
use terrainlayer::tile::TileStore;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    /// * `verbose` - When true, log output is echoed to stdout
    pub fn new(debug_mode: bool, verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string());

        let logging_guard = init_logging(log_dir, &log_file, verbose, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("TerrainLayer v{}", terrainlayer::VERSION);
        info!(
            command = command,
            cache = %self.config.cache.directory.display(),
            zoom = self.config.terrain.zoom,
            "TerrainLayer CLI started"
        );
    }

    /// Create the cache-backed tile store.
    pub fn tile_store(&self) -> Result<Arc<TileStore>, CliError> {
        let client =
            ReqwestClient::with_timeout(self.config.download.timeout).map_err(CliError::Provider)?;
        let provider = HttpTileProvider::new(client, self.config.tile_servers());
        let cache = DiskCache::new(self.config.cache.directory.clone()).map_err(CliError::Cache)?;

        Ok(Arc::new(TileStore::new(cache, Arc::new(provider))))
    }

    /// Create a mosaic builder over a new tile store.
    pub fn mosaic_builder(&self, force_refresh: bool) -> Result<Arc<MosaicBuilder>, CliError> {
        let builder = MosaicBuilder::new(self.tile_store()?, self.config.mosaic_config())
            .with_force_refresh(force_refresh);
        Ok(Arc::new(builder))
    }
}
