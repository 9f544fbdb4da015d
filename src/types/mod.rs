//! Core domain types for glyphrom.
//!
//! - `PixelGrid` - a monochrome sprite with an optional character index
//! - `Flip` - coordinate remapping applied while packing
//! - `SpriteSet` - the ordered sprite collection that becomes a ROM

mod flip;
mod grid;
mod sprite_set;

pub use flip::Flip;
pub use grid::{BoundingBox, PixelGrid, CLEAR_GLYPH, SET_GLYPH};
pub use sprite_set::{SpriteId, SpriteSet};
