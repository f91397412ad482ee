//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::{MAX_ZOOM, MIN_ZOOM};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [terrain] section
    if let Some(section) = ini.section(Some("terrain")) {
        if let Some(v) = section.get("zoom") {
            config.terrain.zoom = v
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|z| (MIN_ZOOM..=MAX_ZOOM).contains(z))
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "terrain".to_string(),
                    key: "zoom".to_string(),
                    value: v.to_string(),
                    reason: format!("must be an integer between {} and {}", MIN_ZOOM, MAX_ZOOM),
                })?;
        }
        if let Some(v) = section.get("min_zscale") {
            config.terrain.min_zscale = v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|s| s.is_finite() && *s > 0.0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "terrain".to_string(),
                    key: "min_zscale".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive number (meters)".to_string(),
                })?;
        }
        if let Some(v) = section.get("smoothing_sigma") {
            config.terrain.smoothing_sigma = v
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|s| s.is_finite() && *s >= 0.0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "terrain".to_string(),
                    key: "smoothing_sigma".to_string(),
                    value: v.to_string(),
                    reason: "must be a non-negative number (0 disables smoothing)".to_string(),
                })?;
        }
    }

    // [servers] section
    if let Some(section) = ini.section(Some("servers")) {
        if let Some(v) = section.get("elevation_url") {
            config.servers.elevation_url = parse_url("elevation_url", v)?;
        }
        if let Some(v) = section.get("elevation_layer") {
            config.servers.elevation_layer = parse_layer("elevation_layer", v)?;
        }
        if let Some(v) = section.get("landcover_url") {
            config.servers.landcover_url = parse_url("landcover_url", v)?;
        }
        if let Some(v) = section.get("landcover_layer") {
            config.servers.landcover_layer = parse_layer("landcover_layer", v)?;
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.cache.directory = expand_tilde(v);
            }
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|t| *t > 0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "download".to_string(),
                    key: "timeout".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds)".to_string(),
                })?;
        }
    }

    // [stream] section
    if let Some(section) = ini.section(Some("stream")) {
        if let Some(v) = section.get("poll_interval_ms") {
            config.stream.poll_interval_ms = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "stream".to_string(),
                    key: "poll_interval_ms".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (milliseconds)".to_string(),
                })?;
        }
        if let Some(v) = section.get("prime_on_start") {
            config.stream.prime_on_start = parse_bool(v);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn parse_url(key: &str, value: &str) -> Result<String, ConfigFileError> {
    let v = value.trim();
    if v.starts_with("http://") || v.starts_with("https://") {
        Ok(v.trim_end_matches('/').to_string())
    } else {
        Err(ConfigFileError::InvalidValue {
            section: "servers".to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be an http:// or https:// URL".to_string(),
        })
    }
}

fn parse_layer(key: &str, value: &str) -> Result<String, ConfigFileError> {
    let v = value.trim().trim_matches('/');
    if v.is_empty() {
        return Err(ConfigFileError::InvalidValue {
            section: "servers".to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(v.to_string())
}

/// Parse a boolean value from various string representations.
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
