//! Unified error types for bmpfont_engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bmpfont_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open file '{path}': {message}")]
    OpenFile { path: PathBuf, message: String },

    #[error("Failed to write file '{path}': {message}")]
    WriteFile { path: PathBuf, message: String },

    // === Decoding Errors ===
    #[error("Not a bitmap file (missing 'BM' signature)")]
    NotABitmap,

    #[error("Bitmap data truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("Unsupported bitmap header size: {size}")]
    UnsupportedHeader { size: u32 },

    #[error("Unsupported bit depth: {bits} bpp")]
    UnsupportedBitDepth { bits: u16 },

    #[error("Unsupported bitmap compression: {compression}")]
    UnsupportedCompression { compression: u32 },

    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    // === Encoding Errors ===
    #[error("No palette held; the grid was never decoded from a palette-bearing source")]
    NoPalette,

    #[error("Palette has {count} entries, at most 256 are supported")]
    PaletteTooLarge { count: usize },

    #[error("Document has no file path to save to")]
    NoFilePath,

    #[error("Grid data length mismatch: expected {expected}, got {actual}")]
    GridSizeMismatch { expected: usize, actual: usize },

    // === Editing Errors ===
    #[error("Color index {index} is outside the palette (0..{palette_len})")]
    ColorIndexOutOfPalette { index: u8, palette_len: usize },
}

/// Result type alias for bmpfont_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Create an open file error
    pub fn open_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::OpenFile {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a write file error
    pub fn write_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::WriteFile {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// True for failures while opening or parsing a source file.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            EngineError::OpenFile { .. }
                | EngineError::NotABitmap
                | EngineError::Truncated { .. }
                | EngineError::UnsupportedHeader { .. }
                | EngineError::UnsupportedBitDepth { .. }
                | EngineError::UnsupportedCompression { .. }
                | EngineError::InvalidDimensions { .. }
                | EngineError::Image(_)
        )
    }

    /// True for failures while saving a document.
    pub fn is_encode_error(&self) -> bool {
        matches!(
            self,
            EngineError::WriteFile { .. }
                | EngineError::NoPalette
                | EngineError::NoFilePath
                | EngineError::PaletteTooLarge { .. }
                | EngineError::GridSizeMismatch { .. }
        )
    }
}
