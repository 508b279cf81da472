//! Conversion of direct color pixels to a palette + index grid.

use std::collections::HashMap;

use color_quant::NeuQuant;

use crate::{Color, EngineError, IndexedGrid, Palette, Result, MAX_PALETTE_SIZE};

/// NeuQuant sampling factor (1 = best quality, 30 = fastest)
const SAMPLE_FACTOR: i32 = 10;

/// Convert RGBA pixels into an indexed image. Alpha is ignored.
///
/// Images with at most 256 distinct colors convert losslessly, with palette
/// entries in order of first appearance. Anything else is reduced to a 256
/// color NeuQuant palette.
pub fn quantize_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<(Palette, IndexedGrid)> {
    let pixel_count = width as usize * height as usize;
    if rgba.len() != pixel_count * 4 {
        return Err(EngineError::GridSizeMismatch {
            expected: pixel_count * 4,
            actual: rgba.len(),
        });
    }

    if let Some((colors, indices)) = exact_palette(rgba) {
        log::debug!("Converted {}x{} image losslessly to {} colors", width, height, colors.len());
        return Ok((Palette::new(colors)?, IndexedGrid::from_pixels(width, height, indices)?));
    }

    log::debug!("Image has more than {} colors, quantizing {}x{}", MAX_PALETTE_SIZE, width, height);
    let opaque: Vec<u8> = rgba.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2], 255]).collect();
    let quantizer = NeuQuant::new(SAMPLE_FACTOR, MAX_PALETTE_SIZE, &opaque);
    let palette = Palette::from_rgb_bytes(&quantizer.color_map_rgb())?;
    let indices = opaque.chunks_exact(4).map(|p| quantizer.index_of(p) as u8).collect();
    Ok((palette, IndexedGrid::from_pixels(width, height, indices)?))
}

fn exact_palette(rgba: &[u8]) -> Option<(Vec<Color>, Vec<u8>)> {
    let mut lookup: HashMap<[u8; 3], u8> = HashMap::new();
    let mut colors = Vec::new();
    let mut indices = Vec::with_capacity(rgba.len() / 4);

    for pixel in rgba.chunks_exact(4) {
        let key = [pixel[0], pixel[1], pixel[2]];
        let index = match lookup.get(&key) {
            Some(index) => *index,
            None => {
                if colors.len() == MAX_PALETTE_SIZE {
                    return None;
                }
                let index = colors.len() as u8;
                colors.push(Color::from(key));
                lookup.insert(key, index);
                index
            }
        };
        indices.push(index);
    }
    Some((colors, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_few_colors_are_lossless() {
        let rgba = [
            10, 20, 30, 255, //
            40, 50, 60, 255, //
            10, 20, 30, 0, //
            70, 80, 90, 255,
        ];
        let (palette, grid) = quantize_rgba(2, 2, &rgba).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.color(0), Some(Color::new(10, 20, 30)));
        assert_eq!(palette.color(2), Some(Color::new(70, 80, 90)));
        assert_eq!(grid.pixels(), &[0, 1, 0, 2]);
    }

    #[test]
    fn test_many_colors_are_quantized() {
        let (width, height) = (32u32, 32u32);
        let mut rgba = Vec::new();
        for i in 0..width * height {
            rgba.extend_from_slice(&[(i % 256) as u8, (i / 4 % 256) as u8, (i * 7 % 256) as u8, 255]);
        }
        let (palette, grid) = quantize_rgba(width, height, &rgba).unwrap();
        assert_eq!(palette.len(), MAX_PALETTE_SIZE);
        assert_eq!(grid.size(), (width, height));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(quantize_rgba(2, 2, &[0; 12]).is_err());
    }
}
