//! Row-major packing.
//!
//! Each row is split into bytes of 8 horizontal pixels, leftmost pixel in
//! bit 7. This is the layout of most character ROMs (one byte per glyph row
//! for 8 pixel wide glyphs).

use crate::error::Result;
use crate::types::{Flip, PixelGrid};

use super::require_byte_aligned;

/// Pack a grid row by row, MSB first.
///
/// Width and height must both be multiples of 8.
pub fn pack_rows(grid: &PixelGrid, flip: Flip) -> Result<Vec<u8>> {
    require_byte_aligned(grid)?;

    let (width, height) = grid.size();
    let mut out = Vec::with_capacity(width * height / 8);
    for y in 0..height {
        for x0 in (0..width).step_by(8) {
            let mut byte = 0u8;
            for bit in 0..8 {
                if flip.pixel_at(x0 + bit, y, grid)? {
                    byte |= 0x80 >> bit;
                }
            }
            out.push(byte);
        }
    }
    Ok(out)
}
