//! Windows bitmap (BMP/DIB) codec for palette-indexed images.
//!
//! Decoding understands the indexed variants found in the wild:
//! - `BITMAPCOREHEADER` (OS/2, 3 byte palette entries) and `BITMAPINFOHEADER` up to V5
//! - 1, 4 and 8 bits per pixel
//! - uncompressed, `BI_RLE8` and `BI_RLE4`
//! - bottom-up and top-down row order
//!
//! Direct color bitmaps (16/24/32 bpp) and non-BMP files are decoded through
//! the `image` crate and quantized.
//!
//! Encoding always produces an uncompressed, bottom-up 8 bpp bitmap with a
//! `BITMAPINFOHEADER` and the palette table written entry for entry.

use std::io::{Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{quantize, Color, EngineError, IndexedGrid, Palette, Result, MAX_PALETTE_SIZE};

use super::{DecodedImage, IndexedCodec};

const FILE_HEADER_SIZE: usize = 14;
const INFO_HEADER_SIZE: u32 = 40;
const CORE_HEADER_SIZE: u32 = 12;

const BI_RGB: u32 = 0;
const BI_RLE8: u32 = 1;
const BI_RLE4: u32 = 2;

/// 72 DPI
const PIXELS_PER_METER: i32 = 2835;

/// Refuse to allocate grids beyond this many cells.
const MAX_PIXELS: u64 = 1 << 28;

/// The BMP container codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct BmpCodec;

impl IndexedCodec for BmpCodec {
    fn name(&self) -> &'static str {
        "BMP"
    }

    fn decode(&self, data: &[u8]) -> Result<DecodedImage> {
        if !data.starts_with(b"BM") {
            log::debug!("No BMP signature, trying generic image decoding");
            return decode_true_color(data);
        }
        let header = BmpHeader::read(data)?;
        if header.bits > 8 {
            log::debug!("{} bpp bitmap is not indexed, quantizing", header.bits);
            return decode_true_color(data);
        }
        decode_indexed(data, &header)
    }

    fn encode(&self, grid: &IndexedGrid, palette: &Palette) -> Result<Vec<u8>> {
        encode_indexed(grid, palette)
    }

    fn palette_bytes(&self, palette: &Palette) -> Vec<u8> {
        palette.colors().iter().flat_map(|c| [c.b, c.g, c.r, 0]).collect()
    }
}

/// Raw palette table of a BMP file as stored on disk.
pub fn palette_table(data: &[u8]) -> Result<&[u8]> {
    if !data.starts_with(b"BM") {
        return Err(EngineError::NotABitmap);
    }
    let header = BmpHeader::read(data)?;
    let start = header.palette_offset;
    let end = start + header.palette_len * header.palette_entry_size;
    data.get(start..end).ok_or(EngineError::Truncated { offset: data.len() })
}

struct BmpHeader {
    pixel_offset: usize,
    width: u32,
    height: u32,
    top_down: bool,
    bits: u16,
    compression: u32,
    palette_offset: usize,
    palette_entry_size: usize,
    palette_len: usize,
}

impl BmpHeader {
    fn read(data: &[u8]) -> Result<Self> {
        if data.len() < FILE_HEADER_SIZE + 4 {
            return Err(EngineError::Truncated { offset: data.len() });
        }
        let mut cursor = Cursor::new(data);
        cursor.set_position(10);
        let pixel_offset = cursor.read_u32::<LittleEndian>()? as usize;
        let header_size = cursor.read_u32::<LittleEndian>()?;

        if !matches!(header_size, CORE_HEADER_SIZE | INFO_HEADER_SIZE | 52 | 56 | 64 | 108 | 124) {
            return Err(EngineError::UnsupportedHeader { size: header_size });
        }
        if data.len() < FILE_HEADER_SIZE + header_size as usize {
            return Err(EngineError::Truncated { offset: data.len() });
        }

        let (width, height, bits, compression, colors_used, palette_entry_size) = if header_size == CORE_HEADER_SIZE {
            let width = cursor.read_u16::<LittleEndian>()? as i64;
            let height = cursor.read_u16::<LittleEndian>()? as i64;
            let _planes = cursor.read_u16::<LittleEndian>()?;
            let bits = cursor.read_u16::<LittleEndian>()?;
            (width, height, bits, BI_RGB, 0, 3)
        } else {
            let width = cursor.read_i32::<LittleEndian>()? as i64;
            let height = cursor.read_i32::<LittleEndian>()? as i64;
            let _planes = cursor.read_u16::<LittleEndian>()?;
            let bits = cursor.read_u16::<LittleEndian>()?;
            let compression = cursor.read_u32::<LittleEndian>()?;
            let _image_size = cursor.read_u32::<LittleEndian>()?;
            let _x_pixels_per_meter = cursor.read_i32::<LittleEndian>()?;
            let _y_pixels_per_meter = cursor.read_i32::<LittleEndian>()?;
            let colors_used = cursor.read_u32::<LittleEndian>()?;
            (width, height, bits, compression, colors_used, 4)
        };

        if width <= 0 || height == 0 || (width as u64) * height.unsigned_abs() > MAX_PIXELS {
            return Err(EngineError::InvalidDimensions { width, height });
        }

        let palette_offset = FILE_HEADER_SIZE + header_size as usize;
        let palette_len = if bits <= 8 {
            let declared = if colors_used == 0 { 1usize << bits } else { colors_used as usize };
            let available = pixel_offset.saturating_sub(palette_offset) / palette_entry_size;
            declared.min(MAX_PALETTE_SIZE).min(available)
        } else {
            0
        };

        Ok(Self {
            pixel_offset,
            width: width as u32,
            height: height.unsigned_abs() as u32,
            top_down: height < 0,
            bits,
            compression,
            palette_offset,
            palette_entry_size,
            palette_len,
        })
    }

    fn read_palette(&self, data: &[u8]) -> Result<Palette> {
        let end = self.palette_offset + self.palette_len * self.palette_entry_size;
        if data.len() < end {
            return Err(EngineError::Truncated { offset: data.len() });
        }
        let colors = data[self.palette_offset..end]
            .chunks_exact(self.palette_entry_size)
            .map(|entry| Color::new(entry[2], entry[1], entry[0]))
            .collect();
        Palette::new(colors)
    }
}

/// Destination for decoded pixels, addressed in file line order.
struct LineSink {
    width: u32,
    height: u32,
    top_down: bool,
    pixels: Vec<u8>,
}

impl LineSink {
    fn new(header: &BmpHeader) -> Self {
        Self {
            width: header.width,
            height: header.height,
            top_down: header.top_down,
            pixels: vec![0; header.width as usize * header.height as usize],
        }
    }

    /// `line` counts from the first stored line; writes outside the image are dropped.
    fn set(&mut self, x: u32, line: u32, index: u8) {
        if x >= self.width || line >= self.height {
            return;
        }
        let y = if self.top_down { line } else { self.height - 1 - line };
        self.pixels[y as usize * self.width as usize + x as usize] = index;
    }

    fn into_grid(self) -> Result<IndexedGrid> {
        IndexedGrid::from_pixels(self.width, self.height, self.pixels)
    }
}

fn decode_indexed(data: &[u8], header: &BmpHeader) -> Result<DecodedImage> {
    if !matches!(header.bits, 1 | 4 | 8) {
        return Err(EngineError::UnsupportedBitDepth { bits: header.bits });
    }
    let palette = header.read_palette(data)?;
    let mut sink = LineSink::new(header);

    match (header.compression, header.bits) {
        (BI_RGB, bits) => read_uncompressed(data, header, bits, &mut sink)?,
        (BI_RLE8, 8) => read_rle(data, header, false, &mut sink)?,
        (BI_RLE4, 4) => read_rle(data, header, true, &mut sink)?,
        (compression, _) => return Err(EngineError::UnsupportedCompression { compression }),
    }

    let grid = sink.into_grid()?;
    if let Some(max) = grid.max_index() {
        if !palette.contains_index(max) {
            log::warn!("Bitmap uses index {} but the palette only has {} entries", max, palette.len());
        }
    }
    log::debug!(
        "Decoded {}x{} {} bpp bitmap with {} palette entries",
        grid.width(),
        grid.height(),
        header.bits,
        palette.len()
    );
    Ok(DecodedImage {
        palette,
        grid,
        palette_from_source: true,
    })
}

fn read_uncompressed(data: &[u8], header: &BmpHeader, bits: u16, sink: &mut LineSink) -> Result<()> {
    let stride = (header.width as usize * bits as usize).div_ceil(32) * 4;
    let end = header.pixel_offset + stride * header.height as usize;
    if data.len() < end {
        return Err(EngineError::Truncated { offset: data.len() });
    }

    let pixels_per_byte = 8 / bits as u32;
    let mask = ((1u16 << bits) - 1) as u8;
    for line in 0..header.height {
        let start = header.pixel_offset + line as usize * stride;
        let row = &data[start..start + stride];
        for x in 0..header.width {
            let byte = row[(x / pixels_per_byte) as usize];
            let shift = 8 - bits as u32 * (x % pixels_per_byte + 1);
            sink.set(x, line, (byte >> shift) & mask);
        }
    }
    Ok(())
}

/// Run-length decoding shared by `BI_RLE8` and `BI_RLE4`.
///
/// A missing end-of-bitmap marker ends decoding at the end of the data.
fn read_rle(data: &[u8], header: &BmpHeader, nibbles: bool, sink: &mut LineSink) -> Result<()> {
    let mut pos = header.pixel_offset;
    let (mut x, mut line) = (0u32, 0u32);
    let byte_at = |pos: usize| data.get(pos).copied().ok_or(EngineError::Truncated { offset: pos });

    while pos + 1 < data.len() {
        if line >= header.height {
            log::debug!("RLE data continues past the last line, ignoring the rest");
            break;
        }
        let count = data[pos];
        let value = data[pos + 1];
        pos += 2;

        if count > 0 {
            for i in 0..count as u32 {
                let index = if nibbles {
                    if i % 2 == 0 { value >> 4 } else { value & 0x0F }
                } else {
                    value
                };
                sink.set(x, line, index);
                x = x.saturating_add(1);
            }
            continue;
        }

        match value {
            0 => {
                x = 0;
                line = line.saturating_add(1);
            }
            1 => break,
            2 => {
                x = x.saturating_add(byte_at(pos)? as u32);
                line = line.saturating_add(byte_at(pos + 1)? as u32);
                pos += 2;
            }
            literal => {
                let literal = literal as usize;
                let byte_len = if nibbles { literal.div_ceil(2) } else { literal };
                for i in 0..literal {
                    let index = if nibbles {
                        let byte = byte_at(pos + i / 2)?;
                        if i % 2 == 0 { byte >> 4 } else { byte & 0x0F }
                    } else {
                        byte_at(pos + i)?
                    };
                    sink.set(x, line, index);
                    x = x.saturating_add(1);
                }
                // absolute runs are padded to a 16 bit boundary
                pos += byte_len + (byte_len & 1);
            }
        }
    }
    Ok(())
}

fn decode_true_color(data: &[u8]) -> Result<DecodedImage> {
    let image = image::load_from_memory(data)?;
    let rgba = image.to_rgba8();
    let (palette, grid) = quantize::quantize_rgba(rgba.width(), rgba.height(), rgba.as_raw())?;
    Ok(DecodedImage {
        palette,
        grid,
        palette_from_source: false,
    })
}

fn encode_indexed(grid: &IndexedGrid, palette: &Palette) -> Result<Vec<u8>> {
    if palette.is_empty() {
        return Err(EngineError::NoPalette);
    }
    if palette.len() > MAX_PALETTE_SIZE {
        return Err(EngineError::PaletteTooLarge { count: palette.len() });
    }
    let (width, height) = grid.size();
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(EngineError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }
    if let Some(max) = grid.max_index() {
        if !palette.contains_index(max) {
            log::warn!("Saving index {} that is outside the {} entry palette", max, palette.len());
        }
    }

    let stride = (width as usize + 3) & !3;
    let palette_size = palette.len() * 4;
    let pixel_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE as usize + palette_size;
    let image_size = stride * height as usize;
    let file_size = pixel_offset + image_size;

    let mut out = Vec::with_capacity(file_size);

    // BITMAPFILEHEADER
    out.write_all(b"BM")?;
    out.write_u32::<LittleEndian>(file_size as u32)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(pixel_offset as u32)?;

    // BITMAPINFOHEADER
    out.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
    out.write_i32::<LittleEndian>(width as i32)?;
    out.write_i32::<LittleEndian>(height as i32)?;
    out.write_u16::<LittleEndian>(1)?;
    out.write_u16::<LittleEndian>(8)?;
    out.write_u32::<LittleEndian>(BI_RGB)?;
    out.write_u32::<LittleEndian>(image_size as u32)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    out.write_u32::<LittleEndian>(palette.len() as u32)?;
    out.write_u32::<LittleEndian>(palette.len() as u32)?;

    out.write_all(&BmpCodec.palette_bytes(palette))?;

    let padding = [0u8; 3];
    for row in grid.rows().rev() {
        out.write_all(row)?;
        out.write_all(&padding[..stride - width as usize])?;
    }

    Ok(out)
}
