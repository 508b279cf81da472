use crate::{EngineError, Result};

/// A `width × height` array of palette indices, stored row-major with the top row first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedGrid {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl IndexedGrid {
    /// Create a grid filled with index 0
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(EngineError::GridSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        if !self.is_in_bounds(x, y) {
            return None;
        }
        Some(self.pixels[self.offset(x, y)])
    }

    /// Overwrite a single cell. Returns the previous index, or `None` when out of bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, index: u8) -> Option<u8> {
        if !self.is_in_bounds(x, y) {
            return None;
        }
        let offset = self.offset(x, y);
        Some(std::mem::replace(&mut self.pixels[offset], index))
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[u8]> {
        // chunks_exact panics on 0
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Largest index used by any cell
    pub fn max_index(&self) -> Option<u8> {
        self.pixels.iter().copied().max()
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
