//! Flip transforms applied while packing.
//!
//! A flip never touches the grid; it only remaps the coordinate a packer
//! reads from.

use std::fmt;
use std::str::FromStr;

use crate::error::{GlyphError, Result};

use super::PixelGrid;

/// Coordinate remapping used by the row and column packers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    /// Read pixels as stored.
    #[default]
    None,
    /// Mirror horizontally.
    X,
    /// Mirror vertically.
    Y,
    /// Mirror both ways (180 degree rotation).
    XY,
}

impl Flip {
    /// All variants in menu order.
    pub const ALL: [Flip; 4] = [Flip::None, Flip::X, Flip::Y, Flip::XY];

    /// Read the pixel that lands at (x, y) after flipping.
    ///
    /// Fails with `OutOfRange` when (x, y) is outside the grid.
    pub fn pixel_at(self, x: usize, y: usize, grid: &PixelGrid) -> Result<bool> {
        grid.get(x, y)?;
        let (w, h) = grid.size();
        let (sx, sy) = match self {
            Flip::None => (x, y),
            Flip::X => (w - 1 - x, y),
            Flip::Y => (x, h - 1 - y),
            Flip::XY => (w - 1 - x, h - 1 - y),
        };
        grid.get(sx, sy)
    }

    /// Human readable label, as used in listing headers.
    pub fn label(self) -> &'static str {
        match self {
            Flip::None => "not flipped",
            Flip::X => "flipped X",
            Flip::Y => "flipped Y",
            Flip::XY => "flipped XY",
        }
    }

    /// Short name accepted on the command line and in the manifest.
    pub fn name(self) -> &'static str {
        match self {
            Flip::None => "none",
            Flip::X => "x",
            Flip::Y => "y",
            Flip::XY => "xy",
        }
    }
}

impl fmt::Display for Flip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Flip {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Flip::None),
            "x" => Ok(Flip::X),
            "y" => Ok(Flip::Y),
            "xy" | "yx" => Ok(Flip::XY),
            other => Err(GlyphError::Parse {
                message: format!("Unknown flip '{}'", other),
                help: Some("Expected one of: none, x, y, xy".to_string()),
            }),
        }
    }
}

impl serde::Serialize for Flip {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Flip {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
