//! Indexed bitmap model for character strip fonts.
//!
//! Decodes palette-indexed bitmaps into an [`IndexedGrid`] plus the [`Palette`]
//! captured at load time, and encodes the grid back with exactly that palette.

mod catalog;
pub mod codec;
mod document;
mod error;
mod grid;
mod palette;
pub mod quantize;
mod strip;

pub use catalog::{is_strip_file_name, parse_catalog_index, scan_workspace, CatalogEntry, STRIP_EXTENSION, STRIP_PREFIX};
pub use codec::{BmpCodec, DecodedImage, IndexedCodec};
pub use document::FontDocument;
pub use error::{EngineError, Result};
pub use grid::IndexedGrid;
pub use palette::{Color, Palette, MAX_PALETTE_SIZE};
pub use strip::{char_height_for_image_height, glyph_label, CharacterStrip, CHARS_PER_STRIP, DEFAULT_CHAR_HEIGHT};
