//! Project files.
//!
//! A project is a `SpriteSet` saved as versioned JSON. Pixels are stored
//! as `#`/`.` rows so files diff well and can be touched up by hand:
//!
//! ```json
//! {
//!   "version": 1,
//!   "sprites": [
//!     { "width": 3, "height": 2, "index": 65, "rows": ["#.#", ".#."] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{GlyphError, Result};
use crate::types::{PixelGrid, SpriteSet};

/// Current schema version.
pub const PROJECT_VERSION: u32 = 1;

/// Conventional project file extension.
pub const PROJECT_EXTENSION: &str = "glyphs.json";

/// On-disk form of a whole project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: u32,
    pub sprites: Vec<SpriteRecord>,
}

/// On-disk form of one sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteRecord {
    pub width: usize,
    pub height: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    pub rows: Vec<String>,
}

impl SpriteRecord {
    fn from_grid(grid: &PixelGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            index: grid.index(),
            rows: grid.rows(),
        }
    }

    fn to_grid(&self, position: usize) -> Result<PixelGrid> {
        let mut grid = PixelGrid::from_rows(self.rows.as_slice()).map_err(|e| GlyphError::Parse {
            message: format!("Sprite {}: {}", position, e),
            help: None,
        })?;
        if !grid.has_size(self.width, self.height) {
            return Err(GlyphError::Parse {
                message: format!(
                    "Sprite {} declares {}x{} but its rows are {}x{}",
                    position,
                    self.width,
                    self.height,
                    grid.width(),
                    grid.height()
                ),
                help: None,
            });
        }
        if let Some(index) = self.index {
            grid.set_index(index);
        }
        Ok(grid)
    }
}

impl ProjectFile {
    pub fn from_set(set: &SpriteSet) -> Self {
        Self {
            version: PROJECT_VERSION,
            sprites: set.iter().map(SpriteRecord::from_grid).collect(),
        }
    }

    pub fn into_set(self) -> Result<SpriteSet> {
        if self.version != PROJECT_VERSION {
            return Err(GlyphError::Parse {
                message: format!("Unsupported project version {}", self.version),
                help: Some(format!("This build reads version {}", PROJECT_VERSION)),
            });
        }
        let mut set = SpriteSet::new();
        for (position, record) in self.sprites.iter().enumerate() {
            set.append(record.to_grid(position)?);
        }
        Ok(set)
    }
}

/// Serialize a sprite set to JSON text.
pub fn to_json(set: &SpriteSet) -> Result<String> {
    serde_json::to_string_pretty(&ProjectFile::from_set(set)).map_err(|e| GlyphError::Parse {
        message: format!("Failed to serialize project: {}", e),
        help: None,
    })
}

/// Parse a sprite set from JSON text.
pub fn from_json(content: &str) -> Result<SpriteSet> {
    let file: ProjectFile = serde_json::from_str(content).map_err(|e| GlyphError::Parse {
        message: format!("Invalid project file: {}", e),
        help: None,
    })?;
    file.into_set()
}

/// Write a project file.
pub fn save(set: &SpriteSet, path: &Path) -> Result<()> {
    info!("Saving {}", path.display());
    let json = to_json(set)?;
    fs::write(path, json + "\n").map_err(|e| GlyphError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write project: {}", e),
    })
}

/// Read a project file.
pub fn load(path: &Path) -> Result<SpriteSet> {
    info!("Loading {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| GlyphError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read project: {}", e),
    })?;
    from_json(&content)
}
