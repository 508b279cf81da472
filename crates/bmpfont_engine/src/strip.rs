//! Character strip view
//!
//! A strip bitmap holds a stack of fixed-height glyphs, one per character code,
//! top to bottom. The glyph height is not stored in the file; it is inferred
//! from the total image height using the heights known from real font sets.

use std::ops::Range;

/// Glyph height used when no better guess is possible.
pub const DEFAULT_CHAR_HEIGHT: u32 = 8;

/// Number of character codes a full strip is expected to hold.
pub const CHARS_PER_STRIP: u32 = 256;

/// Known total strip heights and the glyph height they imply.
const KNOWN_STRIP_HEIGHTS: [(u32, u32); 4] = [(2048, 8), (2259, 9), (3390, 15), (3584, 14)];

/// Infer the glyph height from the total image height.
///
/// Heights not in the known table fall back to `height / 256`, or
/// [`DEFAULT_CHAR_HEIGHT`] if that is zero.
pub fn char_height_for_image_height(image_height: u32) -> u32 {
    if let Some((_, char_height)) = KNOWN_STRIP_HEIGHTS.iter().find(|(h, _)| *h == image_height) {
        return *char_height;
    }
    let guess = image_height / CHARS_PER_STRIP;
    if guess < 1 { DEFAULT_CHAR_HEIGHT } else { guess }
}

/// Read-only interpretation of a grid as stacked glyphs.
///
/// Purely presentational: it drives labels and hover highlighting and never
/// influences how a bitmap is decoded or encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterStrip {
    image_height: u32,
    char_height: u32,
    is_override: bool,
}

impl CharacterStrip {
    pub fn from_image_height(image_height: u32) -> Self {
        Self {
            image_height,
            char_height: char_height_for_image_height(image_height),
            is_override: false,
        }
    }

    /// Strip with an explicit glyph height. Zero is treated as 1.
    pub fn with_char_height(image_height: u32, char_height: u32) -> Self {
        Self {
            image_height,
            char_height: char_height.max(1),
            is_override: true,
        }
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn char_height(&self) -> u32 {
        self.char_height
    }

    /// Whether the glyph height was set explicitly instead of inferred
    pub fn is_override(&self) -> bool {
        self.is_override
    }

    /// Number of complete glyphs; remainder rows do not form a glyph.
    pub fn num_chars(&self) -> u32 {
        self.image_height / self.char_height
    }

    /// Glyph containing grid row `y`, if any
    pub fn glyph_at_row(&self, y: i32) -> Option<u32> {
        if y < 0 {
            return None;
        }
        let glyph = y as u32 / self.char_height;
        (glyph < self.num_chars()).then_some(glyph)
    }

    /// Grid rows covered by a glyph
    pub fn glyph_rows(&self, glyph: u32) -> Option<Range<u32>> {
        if glyph >= self.num_chars() {
            return None;
        }
        let start = glyph * self.char_height;
        Some(start..start + self.char_height)
    }

    pub fn labels(&self) -> impl Iterator<Item = String> {
        (0..self.num_chars()).map(glyph_label)
    }
}

/// Overlay label for a glyph, e.g. `#65 (ASCII 65: 'A')`.
pub fn glyph_label(glyph: u32) -> String {
    let repr = match char::from_u32(glyph) {
        Some(ch) if (32..127).contains(&glyph) => ch,
        _ => '·',
    };
    format!("#{glyph} (ASCII {glyph}: '{repr}')")
}
