//! Pixel-to-byte packing.
//!
//! Three packers turn a `PixelGrid` into ROM bytes:
//! - `pack_rows` - row-major, MSB first
//! - `pack_columns` - column-major, MSB first, written back to front
//! - `pack_column_groups` - column groups of N rows, LSB first
//!
//! `Packer` bundles a layout with a flip so a whole `SpriteSet` can be
//! packed the same way.

mod columns;
mod rows;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GlyphError, Result};
use crate::types::{Flip, PixelGrid};

pub use columns::{pack_column_groups, pack_columns};
pub use rows::pack_rows;

/// Row/column packers need whole bytes in both directions.
fn require_byte_aligned(grid: &PixelGrid) -> Result<()> {
    let (width, height) = grid.size();
    if width % 8 != 0 || height % 8 != 0 {
        return Err(GlyphError::InvalidSize {
            message: format!(
                "Sprite is {}x{}, width and height need to be multiples of 8",
                width, height
            ),
            help: Some("Resize the sprite or use the column-groups layout".to_string()),
        });
    }
    Ok(())
}

/// Layout family, as named on the command line and in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    #[default]
    Rows,
    Columns,
    ColumnGroups,
}

/// A fully specified byte layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Row-major, 8 pixels per byte.
    Rows,
    /// Column-major, 8 pixels per byte, reversed byte order.
    Columns,
    /// Column groups of `bits_per_column` rows.
    ColumnGroups { bits_per_column: usize },
}

impl Layout {
    /// Combine a layout family with the group size (only used by groups).
    pub fn from_kind(kind: LayoutKind, bits_per_column: usize) -> Self {
        match kind {
            LayoutKind::Rows => Layout::Rows,
            LayoutKind::Columns => Layout::Columns,
            LayoutKind::ColumnGroups => Layout::ColumnGroups { bits_per_column },
        }
    }
}

/// A layout plus the flip to apply while packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packer {
    pub layout: Layout,
    /// Ignored by `Layout::ColumnGroups`.
    pub flip: Flip,
}

impl Packer {
    pub fn new(layout: Layout, flip: Flip) -> Self {
        Self { layout, flip }
    }

    /// Row-major packer, the layout of a plain character ROM.
    pub fn rows() -> Self {
        Self::new(Layout::Rows, Flip::None)
    }

    /// Pack a single sprite.
    pub fn pack(&self, grid: &PixelGrid) -> Result<Vec<u8>> {
        match self.layout {
            Layout::Rows => pack_rows(grid, self.flip),
            Layout::Columns => pack_columns(grid, self.flip),
            Layout::ColumnGroups { bits_per_column } => pack_column_groups(grid, bits_per_column),
        }
    }
}

impl fmt::Display for Packer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.layout {
            Layout::Rows => write!(f, "rows {}", self.flip),
            Layout::Columns => write!(f, "columns {}", self.flip),
            Layout::ColumnGroups { bits_per_column } => {
                write!(f, "{} bits per column columns", bits_per_column)
            }
        }
    }
}
