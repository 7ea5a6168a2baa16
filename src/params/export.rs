//! Output configuration.

use std::path::PathBuf;

/// Where and how a generated plate is written
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Wavefront OBJ output path
    pub obj_path: PathBuf,

    /// Optional grayscale PNG preview of the height field
    pub heightmap_path: Option<PathBuf>,

    /// Heightmap resolution (pixels per side)
    pub heightmap_size: u32,

    /// Optional raw native-endian f32 dump of vertex heights
    pub raw_path: Option<PathBuf>,

    /// Replace existing files instead of failing
    pub overwrite: bool,
}

impl ExportConfig {
    /// Largest heightmap edge accepted, in pixels
    pub const MAX_HEIGHTMAP_SIZE: u32 = 8192;

    pub fn new(obj_path: impl Into<PathBuf>) -> Self {
        Self {
            obj_path: obj_path.into(),
            heightmap_path: None,
            heightmap_size: 256,
            raw_path: None,
            overwrite: false,
        }
    }

    /// Every path this export will write
    pub fn targets(&self) -> Vec<&PathBuf> {
        std::iter::once(&self.obj_path)
            .chain(self.heightmap_path.iter())
            .chain(self.raw_path.iter())
            .collect()
    }
}
