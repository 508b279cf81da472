use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Result};

/// Maximum number of entries an indexed bitmap palette can hold.
pub const MAX_PALETTE_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{Color: r={:02X}, g={:02X}, b={:02X}}}", self.r, self.g, self.b)
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn get_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Color::new(value.0, value.1, value.2)
    }
}

impl From<[u8; 3]> for Color {
    fn from(value: [u8; 3]) -> Self {
        Color::new(value[0], value[1], value[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(value: Color) -> [u8; 3] {
        [value.r, value.g, value.b]
    }
}

/// Ordered color table referenced by the pixel indices of an [`crate::IndexedGrid`].
///
/// A palette captured from a source file is never modified; edits only ever
/// change which index a cell refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(EngineError::PaletteTooLarge { count: colors.len() });
        }
        Ok(Self { colors })
    }

    /// Build a palette from packed `R, G, B` triplets. A trailing partial triplet is ignored.
    pub fn from_rgb_bytes(data: &[u8]) -> Result<Self> {
        let colors = data.chunks_exact(3).map(|c| Color::new(c[0], c[1], c[2])).collect();
        Self::new(colors)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, index: u8) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    pub fn contains_index(&self, index: u8) -> bool {
        (index as usize) < self.colors.len()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Packed `R, G, B` triplets in palette order.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_bytes() {
        let palette = Palette::from_rgb_bytes(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color(1), Some(Color::new(4, 5, 6)));
        assert_eq!(palette.color(2), None);
        assert_eq!(palette.to_rgb_bytes(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_too_many_colors() {
        let result = Palette::new(vec![Color::default(); 257]);
        assert!(matches!(result, Err(EngineError::PaletteTooLarge { count: 257 })));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::new(0xFF, 0x80, 0x01).to_hex(), "#ff8001");
    }
}
