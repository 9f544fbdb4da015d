//! Text and table output for packed sprite data.
//!
//! This module turns packed bytes into assembler source and builds the
//! character mapping table ROM consumers use to find sprites.

pub mod asm;
mod hex;
mod mapping;

pub use asm::{export_document, mapping_listing, sprite_listing, AsmOptions};
pub use hex::HexWriter;
pub use mapping::{MappingMode, MappingTable, TABLE_ENTRIES, VARIABLE_ENTRY_SIZE};
