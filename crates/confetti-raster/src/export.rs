//! PNG output

use crate::surface::RasterSurface;
use confetti_core::{ConfettiError, Result};
use std::path::Path;

/// Write the current pixels of a surface to a PNG file
pub fn save_png(surface: &RasterSurface, path: impl AsRef<Path>) -> Result<()> {
    surface
        .snapshot()
        .save_with_format(path.as_ref(), image::ImageFormat::Png)
        .map_err(|e| ConfettiError::ImageError(e.to_string()))
}
