//! Error types for tile fetching.

use crate::cache::CacheError;
use crate::provider::ProviderError;
use crate::tile::TileKey;
use thiserror::Error;

/// Errors that can occur while fetching a tile.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Download failed or the server refused the request
    #[error("Network error fetching {key}: {source}")]
    Network {
        key: TileKey,
        #[source]
        source: ProviderError,
    },

    /// Response body is not a decodable, non-empty image
    #[error("Malformed image for {key}: {reason}")]
    MalformedImage { key: TileKey, reason: String },

    /// Cache read or write failed
    #[error("Cache I/O error for {key}: {source}")]
    Io {
        key: TileKey,
        #[source]
        source: CacheError,
    },
}

impl FetchError {
    /// Key of the tile that failed.
    pub fn key(&self) -> &TileKey {
        match self {
            FetchError::Network { key, .. }
            | FetchError::MalformedImage { key, .. }
            | FetchError::Io { key, .. } => key,
        }
    }
}
