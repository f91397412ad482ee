//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[terrain]
; Zoom level terrain tiles are streamed at, 1-15 (default: 14)
zoom = {}
; Minimum vertical scale of a mosaic in meters (default: 250)
; Flat areas are stretched over at least this range
min_zscale = {}
; Gaussian blur applied to the heightmap (default: 1.0, 0 disables)
smoothing_sigma = {}

[servers]
; Terrarium-encoded elevation tiles: <elevation_url>/<elevation_layer>/<z>/<x>/<y>.png
elevation_url = {}
elevation_layer = {}
; Landcover color tiles: <landcover_url>/<landcover_layer>/<z>/<x>/<y>.png
landcover_url = {}
landcover_layer = {}

[cache]
; Root directory of the tile cache, one subdirectory per layer
directory = {}

[download]
; Timeout in seconds for HTTP requests (default: 30)
timeout = {}

[stream]
; How often the background worker checks for a new target tile (default: 1000)
poll_interval_ms = {}
; Build the first mosaic before the session starts (default: true)
prime_on_start = {}

[logging]
; Log file, cleared at the start of each session
file = {}
"#,
        config.terrain.zoom,
        config.terrain.min_zscale,
        config.terrain.smoothing_sigma,
        config.servers.elevation_url,
        config.servers.elevation_layer,
        config.servers.landcover_url,
        config.servers.landcover_layer,
        path_to_string(&config.cache.directory),
        config.download.timeout,
        config.stream.poll_interval_ms,
        config.stream.prime_on_start,
        path_to_string(&config.logging.file),
    )
}

/// Render a path with the home directory collapsed to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
