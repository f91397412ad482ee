//! File-backed renderer for headless sessions.
//!
//! Stands in for a 3-D terrain node: every regenerated mosaic is written to
//! disk as a pair of PNG files.

use image::RgbImage;
use std::path::{Path, PathBuf};
use terrainlayer::mosaic::HeightmapImage;
use terrainlayer::stream::{Placement, Renderer};
use tracing::{info, warn};

use crate::error::CliError;

/// Writes a heightmap as 16-bit grayscale PNG and a texture as RGB PNG.
pub fn write_images(
    dir: &Path,
    prefix: &str,
    heightmap: &HeightmapImage,
    texture: &RgbImage,
) -> Result<(PathBuf, PathBuf), CliError> {
    let elevation_path = dir.join(format!("{}elevation.png", prefix));
    heightmap
        .save(&elevation_path)
        .map_err(|error| CliError::ImageWrite {
            path: elevation_path.clone(),
            error,
        })?;

    let landcover_path = dir.join(format!("{}landcover.png", prefix));
    texture
        .save(&landcover_path)
        .map_err(|error| CliError::ImageWrite {
            path: landcover_path.clone(),
            error,
        })?;

    Ok((elevation_path, landcover_path))
}

/// Renderer writing each applied mosaic to `frame_NNN_*.png` in a directory.
pub struct FileRenderer {
    output_dir: PathBuf,
    heightmap: Option<HeightmapImage>,
    texture: Option<RgbImage>,
    placement: Option<Placement>,
    frames: usize,
    failures: usize,
}

impl FileRenderer {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            heightmap: None,
            texture: None,
            placement: None,
            frames: 0,
            failures: 0,
        }
    }

    /// Number of mosaics written.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Number of mosaics that could not be written.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Placement of the most recent mosaic.
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }
}

impl Renderer for FileRenderer {
    fn load_heightmap(&mut self, heightmap: &HeightmapImage) {
        self.heightmap = Some(heightmap.clone());
    }

    fn load_texture(&mut self, texture: &RgbImage) {
        self.texture = Some(texture.clone());
    }

    fn set_placement(&mut self, placement: &Placement) {
        self.placement = Some(*placement);
    }

    fn regenerate(&mut self) {
        let (Some(heightmap), Some(texture)) = (&self.heightmap, &self.texture) else {
            warn!("Regenerate called before heightmap and texture were loaded");
            return;
        };

        let prefix = format!("frame_{:03}_", self.frames);
        match write_images(&self.output_dir, &prefix, heightmap, texture) {
            Ok((elevation, _)) => {
                self.frames += 1;
                info!(
                    frame = self.frames,
                    file = %elevation.display(),
                    placement = ?self.placement,
                    "Terrain regenerated"
                );
            }
            Err(e) => {
                self.failures += 1;
                warn!(error = %e, "Failed to write terrain frame");
            }
        }
    }
}
