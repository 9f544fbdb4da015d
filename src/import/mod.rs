//! Import of existing glyph data.
//!
//! - `rom` - raw 8x8 character ROM dumps
//! - `image` - PNG files, binarized into a single sprite

mod image;
mod rom;

pub use self::image::load_image;
pub use rom::{decode_glyph, decode_rom, load_rom, RomOptions, GLYPH_BYTES, GLYPH_SIZE};
