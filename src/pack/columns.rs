//! Column-major packing.
//!
//! Two variants exist. The fixed packer reads 8 vertical pixels per byte
//! MSB first and fills the output from the last byte backwards, which is
//! what the target hardware's column renderer expects. The group packer
//! splits the height into groups of `bits_per_column` rows and shifts each
//! row in from the top, so the earliest row ends up in the lowest bit.

use crate::error::{GlyphError, Result};
use crate::types::{Flip, PixelGrid};

use super::require_byte_aligned;

/// Pack a grid column by column, MSB first, writing bytes back to front.
///
/// Width and height must both be multiples of 8. The traversal runs
/// forward (x outer, y inner) while the write cursor starts at the last
/// byte, so the first column's top byte is the final byte of the output.
pub fn pack_columns(grid: &PixelGrid, flip: Flip) -> Result<Vec<u8>> {
    require_byte_aligned(grid)?;

    let (width, height) = grid.size();
    let mut out = vec![0u8; width * height / 8];
    let mut cursor = out.len();
    for x in 0..width {
        for y0 in (0..height).step_by(8) {
            let mut byte = 0u8;
            for bit in 0..8 {
                if flip.pixel_at(x, y0 + bit, grid)? {
                    byte |= 0x80 >> bit;
                }
            }
            cursor -= 1;
            out[cursor] = byte;
        }
    }
    Ok(out)
}

/// Pack a grid in groups of `bits_per_column` rows, LSB first.
///
/// For every group (top to bottom) and every column (left to right) the
/// group's rows are shifted into an accumulator from bit 7 downwards. A
/// byte is emitted after every 8 rows and any remainder is flushed at the
/// end of the group, so row k of a full byte lands in bit k and row k of
/// an n-row remainder lands in bit 8 - n + k. Rows past the bottom of the
/// grid read as clear.
///
/// The output is always `grid.size_in_bytes()` long, the size an 8 row
/// group needs. Unused trailing bytes stay zero; group sizes that need
/// more room fail with `InvalidSize`.
pub fn pack_column_groups(grid: &PixelGrid, bits_per_column: usize) -> Result<Vec<u8>> {
    if bits_per_column < 1 {
        return Err(GlyphError::Argument {
            message: "Need at least 1 output bit per column".to_string(),
            help: None,
        });
    }

    let (width, height) = grid.size();
    let mut out = vec![0u8; grid.size_in_bytes()];
    let mut cursor = 0;
    let mut emit = |byte: u8| -> Result<()> {
        let capacity = out.len();
        let slot = out.get_mut(cursor).ok_or_else(|| GlyphError::InvalidSize {
            message: format!(
                "{} bits per column overflow the {} byte buffer of a {}x{} sprite",
                bits_per_column, capacity, width, height
            ),
            help: Some("Use a group size that is a multiple of 8".to_string()),
        })?;
        *slot = byte;
        cursor += 1;
        Ok(())
    };

    for y in (0..height).step_by(bits_per_column) {
        for x in 0..width {
            let mut acc = 0u8;
            let mut pending = 0;
            for offset in 0..bits_per_column {
                acc >>= 1;
                let row = y + offset;
                if row < height && grid.at(x, row) {
                    acc |= 0x80;
                }
                pending += 1;
                if pending == 8 {
                    emit(acc)?;
                    acc = 0;
                    pending = 0;
                }
            }
            if pending > 0 {
                emit(acc)?;
            }
        }
    }
    Ok(out)
}
