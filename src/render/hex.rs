//! Hex literal writer for assembler data directives.
//!
//! Produces rows such as `    .db 0x80,0x00,0x3c`, wrapping after a fixed
//! number of bytes. The line break after a full row is deferred until the
//! next byte arrives, so a caller can append a trailing comment to the
//! record that just ended.


use crate::error::{GlyphError, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Accumulates comma separated `0x..` literals into wrapped rows.
#[derive(Debug, Clone)]
pub struct HexWriter {
    out: String,
    bytes_per_row: usize,
    line_prefix: Option<String>,
    row_count: usize,
    newline_pending: bool,
}

impl HexWriter {
    /// Create a writer without a line prefix.
    pub fn new(bytes_per_row: usize) -> Result<Self> {
        if bytes_per_row < 1 {
            return Err(GlyphError::argument("A hex row needs at least 1 byte"));
        }
        Ok(Self {
            out: String::new(),
            bytes_per_row,
            line_prefix: None,
            row_count: 0,
            newline_pending: false,
        })
    }

    /// Create a writer that starts every row with `prefix` (e.g. `"    .db "`).
    pub fn with_prefix(bytes_per_row: usize, prefix: impl Into<String>) -> Result<Self> {
        let mut writer = Self::new(bytes_per_row)?;
        writer.line_prefix = Some(prefix.into());
        Ok(writer)
    }

    /// Append raw text at the current position.
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.out.push_str(text);
        self
    }

    /// Append a value that must fit in a byte.
    pub fn append_value(&mut self, value: u32) -> Result<&mut Self> {
        let byte = u8::try_from(value).map_err(|_| GlyphError::Argument {
            message: format!("Value out of byte range: {}", value),
            help: None,
        })?;
        Ok(self.append_byte(byte))
    }

    /// Append one `0x..` literal.
    pub fn append_byte(&mut self, byte: u8) -> &mut Self {
        if self.newline_pending {
            self.out.push('\n');
            self.row_count = 0;
            self.newline_pending = false;
        }
        if self.row_count != 0 {
            self.out.push(',');
        } else if let Some(prefix) = &self.line_prefix {
            self.out.push_str(prefix);
        }

        self.out.push_str("0x");
        self.out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        self.out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);

        self.row_count += 1;
        if self.row_count == self.bytes_per_row {
            self.newline_pending = true;
        }
        self
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        for &b in bytes {
            self.append_byte(b);
        }
        self
    }

    /// Append a 16-bit value, low byte first.
    pub fn append_word_le(&mut self, value: u16) -> &mut Self {
        let [lo, hi] = value.to_le_bytes();
        self.append_byte(lo).append_byte(hi)
    }

    /// End the current record; the next byte starts a new row.
    pub fn break_line(&mut self) -> &mut Self {
        self.newline_pending = true;
        self
    }

    /// Text written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}
