//! Container codecs for indexed bitmaps.
//!
//! The edit model only ever talks to an [`IndexedCodec`], so alternate
//! container backends can be plugged in without touching the editing code.

mod bmp;

pub use bmp::{palette_table, BmpCodec};

use std::path::Path;

use crate::{IndexedGrid, Palette, Result};

/// A decoded container: index grid plus the palette that goes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub palette: Palette,
    pub grid: IndexedGrid,
    /// False when the palette was computed from direct color pixels instead of read from the file
    pub palette_from_source: bool,
}

impl DecodedImage {
    pub fn into_parts(self) -> (Palette, IndexedGrid) {
        (self.palette, self.grid)
    }

    /// The palette table stored in the file, if there was one.
    pub fn source_palette(&self) -> Option<&Palette> {
        self.palette_from_source.then_some(&self.palette)
    }
}

/// Codec between a container format and a (palette, index grid) pair.
pub trait IndexedCodec {
    /// Human readable name of the container format
    fn name(&self) -> &'static str;

    /// Decode a file into its palette and index grid.
    ///
    /// Sources that are not palette-indexed are converted to the nearest
    /// indexed representation; [`DecodedImage::palette_from_source`] is false for those.
    fn decode(&self, data: &[u8]) -> Result<DecodedImage>;

    /// Encode a grid using exactly the given palette, never re-quantized or reordered.
    fn encode(&self, grid: &IndexedGrid, palette: &Palette) -> Result<Vec<u8>>;

    /// The palette table as it is laid out inside the container.
    fn palette_bytes(&self, palette: &Palette) -> Vec<u8>;
}

/// Pick a codec for a path. Only BMP is written, so this is the fallback for everything.
pub fn codec_for_path(path: &Path) -> &'static dyn IndexedCodec {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if !ext.eq_ignore_ascii_case("bmp") {
            log::debug!("No dedicated codec for '.{}', using {}", ext, BmpCodec.name());
        }
    }
    &BmpCodec
}
