use miette::Diagnostic;
use thiserror::Error;

/// Main error type for glyphrom operations
#[derive(Error, Diagnostic, Debug)]
pub enum GlyphError {
    #[error("IO error: {0}")]
    #[diagnostic(code(glyphrom::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(glyphrom::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(glyphrom::argument))]
    Argument {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid size: {message}")]
    #[diagnostic(code(glyphrom::size))]
    InvalidSize {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} grid")]
    #[diagnostic(code(glyphrom::range))]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Not found: {message}")]
    #[diagnostic(code(glyphrom::not_found))]
    NotFound { message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(glyphrom::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl GlyphError {
    /// Shorthand for an `Argument` error without help text.
    pub fn argument(message: impl Into<String>) -> Self {
        GlyphError::Argument {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GlyphError>;
