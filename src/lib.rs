//! glyphrom - 1-bit character set editor and ROM exporter
//!
//! A library for turning fixed-size monochrome sprites (character glyphs)
//! into packed byte streams, hex assembly listings and character mapping
//! tables for 8-bit style display hardware.

pub mod cli;
pub mod error;
pub mod import;
pub mod manifest;
pub mod output;
pub mod pack;
pub mod project;
pub mod render;
pub mod types;

pub use error::{GlyphError, Result};
pub use import::{decode_rom, load_image, load_rom, RomOptions};
pub use manifest::{Manifest, MANIFEST_FILENAME};
pub use pack::{pack_column_groups, pack_columns, pack_rows, Layout, LayoutKind, Packer};
pub use render::{
    export_document, mapping_listing, sprite_listing, AsmOptions, HexWriter, MappingMode,
    MappingTable,
};
pub use types::{BoundingBox, Flip, PixelGrid, SpriteId, SpriteSet};
