//! Character ROM dump import.
//!
//! A dump is a sequence of 8x8 glyphs, 8 bytes each, one byte per row with
//! the leftmost pixel in bit 7. This is exactly what `pack_rows` with no
//! flip produces, so import followed by a row export reproduces the dump.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{GlyphError, Result};
use crate::types::{PixelGrid, SpriteSet};

/// Width and height of a ROM glyph.
pub const GLYPH_SIZE: usize = 8;

/// Bytes per ROM glyph.
pub const GLYPH_BYTES: usize = GLYPH_SIZE * GLYPH_SIZE / 8;

/// Options for decoding a ROM dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomOptions {
    /// Number of glyphs to read.
    pub glyphs: usize,
    /// Give glyph i the character index i.
    pub map_indices: bool,
}

impl Default for RomOptions {
    fn default() -> Self {
        Self {
            glyphs: 256,
            map_indices: false,
        }
    }
}

/// Decode one 8x8 glyph from its 8 row bytes.
pub fn decode_glyph(rows: &[u8]) -> Result<PixelGrid> {
    let mut grid = PixelGrid::new(GLYPH_SIZE, GLYPH_SIZE)?;
    for (y, &byte) in rows.iter().take(GLYPH_SIZE).enumerate() {
        for x in 0..GLYPH_SIZE {
            if byte & (0x80 >> x) != 0 {
                grid.set(x, y)?;
            }
        }
    }
    Ok(grid)
}

/// Decode a ROM dump held in memory.
///
/// Bytes past the last requested glyph are ignored; a dump that is too
/// short fails.
pub fn decode_rom(data: &[u8], options: RomOptions) -> Result<SpriteSet> {
    let needed = options
        .glyphs
        .checked_mul(GLYPH_BYTES)
        .ok_or_else(|| GlyphError::Argument {
            message: format!("Glyph count {} is too large", options.glyphs),
            help: Some("Check the glyph count".to_string()),
        })?;
    if data.len() < needed {
        return Err(GlyphError::Parse {
            message: format!(
                "ROM dump has {} bytes, {} glyphs need {}",
                data.len(),
                options.glyphs,
                needed
            ),
            help: Some("Check the glyph count or the dump file".to_string()),
        });
    }

    let mut set = SpriteSet::new();
    for (i, rows) in data[..needed].chunks_exact(GLYPH_BYTES).enumerate() {
        let mut glyph = decode_glyph(rows)?;
        if options.map_indices {
            glyph.set_index(i as u32);
        }
        set.append(glyph);
    }
    Ok(set)
}

/// Read and decode a ROM dump file.
pub fn load_rom(path: &Path, options: RomOptions) -> Result<SpriteSet> {
    info!("Importing from ROM at {}", path.display());
    let data = fs::read(path).map_err(|e| GlyphError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read ROM dump: {}", e),
    })?;
    decode_rom(&data, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::Packer;
    use tempfile::tempdir;

    fn sample_rom(glyphs: usize) -> Vec<u8> {
        (0..glyphs * GLYPH_BYTES).map(|i| (i * 37 % 256) as u8).collect()
    }

    #[test]
    fn test_decode_glyph_msb_first() {
        let glyph = decode_glyph(&[0x80, 0x01, 0, 0, 0, 0, 0, 0xFF]).unwrap();
        assert!(glyph.get(0, 0).unwrap());
        assert!(glyph.get(7, 1).unwrap());
        assert!(!glyph.get(1, 0).unwrap());
        assert_eq!(glyph.rows()[7], "########");
    }

    #[test]
    fn test_decode_rom_roundtrips_through_rows() {
        let rom = sample_rom(256);
        let set = decode_rom(&rom, RomOptions::default()).unwrap();
        assert_eq!(set.len(), 256);

        let packed = set.pack(false, &Packer::rows()).unwrap();
        assert_eq!(packed, rom);
    }

    #[test]
    fn test_map_indices() {
        let rom = sample_rom(4);
        let options = RomOptions {
            glyphs: 4,
            map_indices: true,
        };
        let set = decode_rom(&rom, options).unwrap();
        let indices: Vec<Option<u32>> = set.iter().map(|g| g.index()).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_unmapped_by_default() {
        let set = decode_rom(&sample_rom(2), RomOptions { glyphs: 2, map_indices: false }).unwrap();
        assert!(set.iter().all(|g| !g.has_index()));
    }

    #[test]
    fn test_truncated_dump_fails() {
        let rom = sample_rom(3);
        assert!(matches!(
            decode_rom(&rom, RomOptions::default()),
            Err(GlyphError::Parse { .. })
        ));
    }

    #[test]
    fn test_huge_glyph_count_fails() {
        let options = RomOptions {
            glyphs: usize::MAX / 4,
            map_indices: false,
        };
        assert!(matches!(
            decode_rom(&[0u8; 16], options),
            Err(GlyphError::Argument { .. })
        ));
    }

    #[test]
    fn test_load_rom_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("character.rom");
        fs::write(&path, sample_rom(16)).unwrap();

        let set = load_rom(&path, RomOptions { glyphs: 16, map_indices: false }).unwrap();
        assert_eq!(set.len(), 16);
    }
}
