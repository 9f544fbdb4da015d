//! Character code to sprite mapping table.
//!
//! ROM consumers look up a character code (0-255) in this table to find
//! the sprite to draw. When every mapped sprite packs to the same number
//! of bytes the table holds one byte per code (the sprite's position
//! among mapped sprites). Otherwise each code gets four bytes: a 16-bit
//! little-endian offset into the packed sprite data, then width and
//! height in pixels.
//!
//! When several sprites claim the same code, the last one in sequence
//! order wins.

use log::{debug, warn};

use crate::error::{GlyphError, Result};
use crate::types::{PixelGrid, SpriteSet};

/// Number of character codes covered by the table.
pub const TABLE_ENTRIES: usize = 256;

/// Bytes per entry in variable mode.
pub const VARIABLE_ENTRY_SIZE: usize = 4;

/// Which of the two table layouts was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingMode {
    /// 1 byte per code: position among mapped sprites.
    Uniform,
    /// 4 bytes per code: offset (LE16), width, height.
    Variable,
}

/// A built mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    mode: MappingMode,
    bytes: Vec<u8>,
}

fn to_byte(value: usize, what: &str) -> Result<u8> {
    u8::try_from(value).map_err(|_| GlyphError::Argument {
        message: format!("{} {} does not fit in a mapping table byte", what, value),
        help: None,
    })
}

impl MappingTable {
    /// Build the table for the mapped sprites of `set`.
    pub fn build(set: &SpriteSet) -> Result<Self> {
        let mapped: Vec<&PixelGrid> = set.mapped().collect();

        // Last sprite in sequence order wins a code.
        let mut slots: [Option<usize>; TABLE_ENTRIES] = [None; TABLE_ENTRIES];
        for (position, sprite) in mapped.iter().enumerate() {
            let Some(code) = sprite.index() else {
                continue;
            };
            match slots.get_mut(code as usize) {
                Some(slot) => {
                    if let Some(previous) = slot.replace(position) {
                        debug!(
                            "character {} remapped from sprite {} to sprite {}",
                            code, previous, position
                        );
                    }
                }
                None => warn!("sprite index {} is outside the mapping table", code),
            }
        }

        let mode = if set.all_same_size_in_bytes(PixelGrid::has_index) {
            MappingMode::Uniform
        } else {
            MappingMode::Variable
        };

        let bytes = match mode {
            MappingMode::Uniform => {
                let mut bytes = vec![0u8; TABLE_ENTRIES];
                for (code, slot) in slots.iter().enumerate() {
                    if let Some(position) = slot {
                        bytes[code] = to_byte(*position, "Sprite position")?;
                    }
                }
                bytes
            }
            MappingMode::Variable => {
                // Start of each mapped sprite in the concatenated data
                let mut offsets = Vec::with_capacity(mapped.len());
                let mut offset = 0usize;
                for sprite in &mapped {
                    offsets.push(offset);
                    offset += sprite.size_in_bytes();
                }

                let mut bytes = vec![0u8; TABLE_ENTRIES * VARIABLE_ENTRY_SIZE];
                for (code, slot) in slots.iter().enumerate() {
                    let Some(position) = *slot else {
                        continue;
                    };
                    let sprite = mapped[position];
                    let offset =
                        u16::try_from(offsets[position]).map_err(|_| GlyphError::Argument {
                            message: format!(
                                "Sprite data offset {} exceeds the 16-bit mapping table range",
                                offsets[position]
                            ),
                            help: Some(
                                "Reduce the number or size of mapped sprites".to_string(),
                            ),
                        })?;
                    debug!("character {} -> sprite {} at offset {}", code, position, offset);

                    let start = code * VARIABLE_ENTRY_SIZE;
                    let entry = &mut bytes[start..start + VARIABLE_ENTRY_SIZE];
                    entry[..2].copy_from_slice(&offset.to_le_bytes());
                    entry[2] = to_byte(sprite.width(), "Sprite width")?;
                    entry[3] = to_byte(sprite.height(), "Sprite height")?;
                }
                bytes
            }
        };

        Ok(Self { mode, bytes })
    }

    pub fn mode(&self) -> MappingMode {
        self.mode
    }

    /// Raw table bytes (256 or 1024).
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Entry bytes for one character code.
    pub fn entry(&self, code: u8) -> &[u8] {
        let size = match self.mode {
            MappingMode::Uniform => 1,
            MappingMode::Variable => VARIABLE_ENTRY_SIZE,
        };
        let start = code as usize * size;
        &self.bytes[start..start + size]
    }
}
