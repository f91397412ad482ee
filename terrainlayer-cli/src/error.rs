//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;
use terrainlayer::cache::CacheError;
use terrainlayer::config::ConfigFileError;
use terrainlayer::coord::CoordError;
use terrainlayer::mosaic::MosaicError;
use terrainlayer::provider::ProviderError;
use terrainlayer::stream::SessionError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Tile arguments do not name a valid tile
    InvalidTile(CoordError),
    /// Failed to open the tile cache
    Cache(CacheError),
    /// Failed to create the HTTP client
    Provider(ProviderError),
    /// Failed to build a mosaic
    Mosaic(MosaicError),
    /// Streaming session failed
    Session(SessionError),
    /// Failed to create an output directory
    OutputDir { path: PathBuf, error: std::io::Error },
    /// Failed to write an output image
    ImageWrite {
        path: PathBuf,
        error: image::ImageError,
    },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Mosaic(MosaicError::IncompleteNeighborhood { .. })
            | CliError::Provider(_) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network connection to the tile servers");
                eprintln!("  2. Server URLs in [servers] of config.ini are wrong");
                eprintln!("  3. The landcover server requires an API key in its URL");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!(
                    "Check {} or recreate it with: terrainlayer config init --force",
                    terrainlayer::config::config_file_path().display()
                );
            }
            CliError::InvalidTile(_) => {
                eprintln!();
                eprintln!("Pass either --x and --y, or --lat and --lon, with --zoom in 1-15");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidTile(e) => write!(f, "Invalid tile: {}", e),
            CliError::Cache(e) => write!(f, "Failed to open tile cache: {}", e),
            CliError::Provider(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Mosaic(e) => write!(f, "Failed to build mosaic: {}", e),
            CliError::Session(e) => write!(f, "Streaming session failed: {}", e),
            CliError::OutputDir { path, error } => {
                write!(
                    f,
                    "Failed to create output directory '{}': {}",
                    path.display(),
                    error
                )
            }
            CliError::ImageWrite { path, error } => {
                write!(f, "Failed to write image '{}': {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidTile(e) => Some(e),
            CliError::Cache(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Mosaic(e) => Some(e),
            CliError::Session(e) => Some(e),
            CliError::OutputDir { error, .. } => Some(error),
            CliError::ImageWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::InvalidTile(e)
    }
}

impl From<MosaicError> for CliError {
    fn from(e: MosaicError) -> Self {
        CliError::Mosaic(e)
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        CliError::Session(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err: CliError = ConfigFileError::InvalidValue {
            section: "terrain".to_string(),
            key: "zoom".to_string(),
            value: "99".to_string(),
            reason: "must be an integer between 1 and 15".to_string(),
        }
        .into();

        let message = err.to_string();
        assert!(message.starts_with("Configuration error:"));
        assert!(message.contains("terrain.zoom"));
    }

    #[test]
    fn test_invalid_tile_has_source() {
        let err: CliError = CoordError::InvalidZoom(20).into();

        assert!(err.to_string().contains("Invalid tile"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
