//! Configuration file handling for ~/.terrainlayer/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::mosaic::MosaicConfig;
use crate::provider::{TileEndpoint, TileServers};
use crate::stream::StreamConfig;

pub use super::defaults::*;
pub use super::settings::*;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.terrainlayer/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.terrainlayer/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// Mosaic builder settings.
    pub fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            min_zscale: self.terrain.min_zscale,
            smoothing_sigma: self.terrain.smoothing_sigma,
        }
    }

    /// Streaming session settings.
    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            poll_interval: Duration::from_millis(self.stream.poll_interval_ms),
            prime_on_start: self.stream.prime_on_start,
        }
    }

    /// Tile server endpoints.
    pub fn tile_servers(&self) -> TileServers {
        TileServers {
            elevation: TileEndpoint::new(
                &self.servers.elevation_url,
                &self.servers.elevation_layer,
            ),
            landcover: TileEndpoint::new(
                &self.servers.landcover_url,
                &self.servers.landcover_layer,
            ),
        }
    }
}

/// Get the path to the config directory (~/.terrainlayer).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".terrainlayer")
}

/// Get the path to the config file (~/.terrainlayer/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
