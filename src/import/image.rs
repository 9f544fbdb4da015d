//! PNG import.
//!
//! Reads an image file and binarizes it into a sprite. Any pixel with
//! non-zero brightness and alpha becomes set.

use std::path::Path;

use log::info;

use crate::error::{GlyphError, Result};
use crate::types::PixelGrid;

/// Load an image file as a new sprite.
pub fn load_image(path: &Path) -> Result<PixelGrid> {
    info!("Importing image {}", path.display());
    let image = image::open(path).map_err(|e| GlyphError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut grid = PixelGrid::new(1, 1)?;
    grid.set_to_image(&image)?;
    Ok(grid)
}
