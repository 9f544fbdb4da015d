//! Assembly source output.
//!
//! Renders packed sprite data and the mapping table as data directives:
//!
//! ```text
//! charset:
//! ; data organization: rows not flipped
//!     .db 0x00,0x18,0x24,0x42,0x7e,0x42,0x42,0x00 ; 'A'
//!
//! charset_mapping:
//! ; All sprites have the same size,this table maps to the sprite index(8x8 pixels)
//!     .db 0x00,0x00,...
//! ```

use crate::error::Result;
use crate::pack::Packer;
use crate::types::{PixelGrid, SpriteSet};

use super::hex::HexWriter;
use super::mapping::{MappingMode, MappingTable};

/// Formatting options for assembly listings.
#[derive(Debug, Clone)]
pub struct AsmOptions {
    /// Indentation in front of each directive.
    pub line_prefix: String,
    /// Data directive, including the trailing space.
    pub directive: String,
    /// Bytes per directive line.
    pub bytes_per_row: usize,
    /// Skip sprites without a character index.
    pub only_mapped: bool,
}

impl Default for AsmOptions {
    fn default() -> Self {
        Self {
            line_prefix: "    ".to_string(),
            directive: ".db ".to_string(),
            bytes_per_row: 16,
            only_mapped: true,
        }
    }
}

impl AsmOptions {
    fn writer(&self) -> Result<HexWriter> {
        HexWriter::with_prefix(
            self.bytes_per_row,
            format!("{}{}", self.line_prefix, self.directive),
        )
    }
}

/// Trailing comment naming the character a sprite is mapped to.
fn character_comment(sprite: &PixelGrid) -> String {
    match sprite.index() {
        None => " ; unmapped".to_string(),
        Some(code) => match char::from_u32(code) {
            Some(c) if code >= 32 && !c.is_control() => format!(" ; '{}'", c),
            _ => " ; not printable".to_string(),
        },
    }
}

/// One record per sprite: its packed bytes followed by a character comment.
pub fn sprite_listing(set: &SpriteSet, packer: &Packer, options: &AsmOptions) -> Result<String> {
    let mut writer = options.writer()?;
    for sprite in set.iter().filter(|s| !options.only_mapped || s.has_index()) {
        writer
            .append_bytes(&packer.pack(sprite)?)
            .append_text(&character_comment(sprite))
            .break_line();
    }
    Ok(writer.finish())
}

/// The mapping table with a header comment describing its layout.
pub fn mapping_listing(
    table: &MappingTable,
    set: &SpriteSet,
    options: &AsmOptions,
) -> Result<String> {
    let mut writer = options.writer()?;
    match table.mode() {
        MappingMode::Uniform => {
            writer.append_text(
                "; All sprites have the same size,this table maps to the sprite index",
            );
            if let Some(first) = set.get(0) {
                writer.append_text(&format!("({}x{} pixels)", first.width(), first.height()));
            }
        }
        MappingMode::Variable => {
            writer.append_text(
                "; Sprites have different sizes,this mapping table holds 4-byte entries \
                 with each containing 16-bit offset,sprite width (pixels),sprite height (pixels)",
            );
        }
    }
    writer.append_text("\n").append_bytes(table.bytes());
    Ok(writer.finish())
}

/// Complete source file: sprite data under `charset:` and the table under
/// `charset_mapping:`.
pub fn export_document(set: &SpriteSet, packer: &Packer, options: &AsmOptions) -> Result<String> {
    let table = MappingTable::build(set)?;
    let mut doc = String::new();
    doc.push_str("charset:\n");
    doc.push_str(&format!("; data organization: {}\n", packer));
    doc.push_str(&sprite_listing(set, packer, options)?);
    doc.push_str("\n\ncharset_mapping:\n");
    doc.push_str(&mapping_listing(&table, set, options)?);
    doc.push('\n');
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::Layout;
    use crate::types::Flip;

    fn glyph(index: Option<u32>, pixel: (usize, usize)) -> PixelGrid {
        let mut grid = PixelGrid::new(8, 8).unwrap();
        grid.set(pixel.0, pixel.1).unwrap();
        if let Some(i) = index {
            grid.set_index(i);
        }
        grid
    }

    #[test]
    fn test_character_comment() {
        assert_eq!(character_comment(&glyph(Some(65), (0, 0))), " ; 'A'");
        assert_eq!(character_comment(&glyph(Some(31), (0, 0))), " ; not printable");
        assert_eq!(character_comment(&glyph(Some(127), (0, 0))), " ; not printable");
        assert_eq!(character_comment(&glyph(None, (0, 0))), " ; unmapped");
    }

    #[test]
    fn test_sprite_listing_one_record_per_line() {
        let set: SpriteSet = vec![
            glyph(Some(65), (0, 0)),
            glyph(None, (1, 1)),
            glyph(Some(1), (7, 7)),
        ]
        .into_iter()
        .collect();

        let listing = sprite_listing(&set, &Packer::rows(), &AsmOptions::default()).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(
            lines,
            vec![
                "    .db 0x80,0x00,0x00,0x00,0x00,0x00,0x00,0x00 ; 'A'",
                "    .db 0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x01 ; not printable",
            ]
        );
    }

    #[test]
    fn test_sprite_listing_includes_unmapped_on_request() {
        let set: SpriteSet = vec![glyph(None, (0, 0))].into_iter().collect();
        let options = AsmOptions {
            only_mapped: false,
            ..Default::default()
        };
        let listing = sprite_listing(&set, &Packer::rows(), &options).unwrap();
        assert!(listing.ends_with(" ; unmapped"));
    }

    #[test]
    fn test_sprite_listing_wraps_long_sprites() {
        let mut grid = PixelGrid::new(16, 16).unwrap();
        grid.set_index(66);
        let set: SpriteSet = vec![grid].into_iter().collect();

        let listing = sprite_listing(&set, &Packer::rows(), &AsmOptions::default()).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("    .db 0x00"));
        assert!(lines[1].ends_with("0x00 ; 'B'"));
    }

    #[test]
    fn test_mapping_listing_uniform_header() {
        let set: SpriteSet = vec![glyph(Some(0), (0, 0))].into_iter().collect();
        let table = MappingTable::build(&set).unwrap();
        let listing = mapping_listing(&table, &set, &AsmOptions::default()).unwrap();

        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(
            lines[0],
            "; All sprites have the same size,this table maps to the sprite index(8x8 pixels)"
        );
        // 256 entries at 16 per row
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[1].matches("0x").count(), 16);
    }

    #[test]
    fn test_mapping_listing_uniform_header_uses_first_sprite() {
        let unmapped = PixelGrid::new(16, 8).unwrap();
        let set: SpriteSet = vec![unmapped, glyph(Some(65), (0, 0))].into_iter().collect();
        let table = MappingTable::build(&set).unwrap();
        assert_eq!(table.mode(), MappingMode::Uniform);

        let listing = mapping_listing(&table, &set, &AsmOptions::default()).unwrap();
        assert!(listing.starts_with(
            "; All sprites have the same size,this table maps to the sprite index(16x8 pixels)\n"
        ));
    }

    #[test]
    fn test_mapping_listing_variable_rows() {
        let mut big = PixelGrid::new(16, 16).unwrap();
        big.set_index(66);
        let set: SpriteSet = vec![glyph(Some(65), (0, 0)), big].into_iter().collect();
        let table = MappingTable::build(&set).unwrap();
        let listing = mapping_listing(&table, &set, &AsmOptions::default()).unwrap();

        let lines: Vec<&str> = listing.lines().collect();
        assert!(lines[0].starts_with("; Sprites have different sizes"));
        // 1024 bytes at 16 per row
        assert_eq!(lines.len(), 65);
        // Codes 64-67 share table row 16
        let row = lines[17].trim_start_matches("    .db ");
        assert_eq!(
            row,
            concat!(
                "0x00,0x00,0x00,0x00,0x00,0x00,0x08,0x08,",
                "0x08,0x00,0x10,0x10,0x00,0x00,0x00,0x00"
            )
        );
    }

    #[test]
    fn test_export_document_sections() {
        let set: SpriteSet = vec![glyph(Some(65), (0, 0))].into_iter().collect();
        let packer = Packer::new(Layout::Columns, Flip::X);
        let doc = export_document(&set, &packer, &AsmOptions::default()).unwrap();

        assert!(doc.starts_with(
            "charset:\n; data organization: columns flipped X\n    .db "
        ));
        assert!(doc.contains(" ; 'A'\n\ncharset_mapping:\n; All sprites"));
        assert!(doc.ends_with("0x00\n"));
    }
}
