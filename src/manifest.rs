//! Project manifest (glyphrom.yaml) parsing.
//!
//! The manifest holds the settings that would otherwise be repeated on
//! every command line: where the character ROM lives, which project file
//! to edit, and how to pack and format exports. CLI flags override it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GlyphError, Result};
use crate::pack::{Layout, LayoutKind, Packer};
use crate::render::AsmOptions;
use crate::types::Flip;

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "glyphrom.yaml";

/// Project manifest loaded from glyphrom.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Character ROM dump to import from.
    pub rom: Option<PathBuf>,

    /// Number of 8x8 glyphs in the ROM dump.
    pub glyphs: usize,

    /// Project file holding the sprite set.
    pub project: Option<PathBuf>,

    /// Output directory for exports.
    pub output: PathBuf,

    /// Byte layout for exports.
    pub layout: LayoutKind,

    /// Flip applied by the row and column layouts.
    pub flip: Flip,

    /// Group height for the column-groups layout.
    pub bits_per_column: usize,

    /// Bytes per assembler line.
    pub bytes_per_row: usize,

    /// Indentation in front of each directive.
    pub line_prefix: String,

    /// Data directive, including the trailing space.
    pub directive: String,

    /// Export sprites without a character index too.
    pub all: bool,
}

impl Default for Manifest {
    fn default() -> Self {
        let asm = AsmOptions::default();
        Self {
            rom: None,
            glyphs: 256,
            project: None,
            output: PathBuf::from("dist"),
            layout: LayoutKind::Rows,
            flip: Flip::None,
            bits_per_column: 8,
            bytes_per_row: asm.bytes_per_row,
            line_prefix: asm.line_prefix,
            directive: asm.directive,
            all: false,
        }
    }
}

impl Manifest {
    /// Load manifest from a glyphrom.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GlyphError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| GlyphError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Load `path` if given, otherwise glyphrom.yaml in `dir` if present,
    /// otherwise defaults.
    pub fn resolve(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(MANIFEST_FILENAME);
        if candidate.exists() {
            log::info!("Using manifest {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| GlyphError::Parse {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// Packer for the configured layout and flip.
    pub fn packer(&self) -> Packer {
        Packer::new(Layout::from_kind(self.layout, self.bits_per_column), self.flip)
    }

    /// Assembler formatting options.
    pub fn asm_options(&self) -> AsmOptions {
        AsmOptions {
            line_prefix: self.line_prefix.clone(),
            directive: self.directive.clone(),
            bytes_per_row: self.bytes_per_row,
            only_mapped: !self.all,
        }
    }
}
