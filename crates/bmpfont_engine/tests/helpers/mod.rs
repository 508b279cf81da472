//! Shared test helpers: hand-assembled bitmap files independent of the encoder.

#![allow(dead_code)]

pub const BI_RGB: u32 = 0;
pub const BI_RLE8: u32 = 1;
pub const BI_RLE4: u32 = 2;

/// Assemble a bitmap with a 40 byte `BITMAPINFOHEADER`.
///
/// `palette` entries are RGB and written as `B, G, R, 0`. A negative height
/// produces a top-down bitmap. `pixel_data` is stored verbatim.
pub fn info_bitmap(width: i32, height: i32, bits: u16, compression: u32, palette: &[[u8; 3]], colors_used: u32, pixel_data: &[u8]) -> Vec<u8> {
    let pixel_offset = 14 + 40 + palette.len() * 4;
    let mut data = Vec::new();
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&((pixel_offset + pixel_data.len()) as u32).to_le_bytes());
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(&(pixel_offset as u32).to_le_bytes());

    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&bits.to_le_bytes());
    data.extend_from_slice(&compression.to_le_bytes());
    data.extend_from_slice(&(pixel_data.len() as u32).to_le_bytes());
    data.extend_from_slice(&3780i32.to_le_bytes());
    data.extend_from_slice(&3780i32.to_le_bytes());
    data.extend_from_slice(&colors_used.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());

    for [r, g, b] in palette {
        data.extend_from_slice(&[*b, *g, *r, 0]);
    }
    data.extend_from_slice(pixel_data);
    data
}

/// Assemble an OS/2 style bitmap with a 12 byte `BITMAPCOREHEADER` and 3 byte palette entries.
pub fn core_bitmap(width: u16, height: u16, bits: u16, palette: &[[u8; 3]], pixel_data: &[u8]) -> Vec<u8> {
    let pixel_offset = 14 + 12 + palette.len() * 3;
    let mut data = Vec::new();
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&((pixel_offset + pixel_data.len()) as u32).to_le_bytes());
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(&(pixel_offset as u32).to_le_bytes());

    data.extend_from_slice(&12u32.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&bits.to_le_bytes());

    for [r, g, b] in palette {
        data.extend_from_slice(&[*b, *g, *r]);
    }
    data.extend_from_slice(pixel_data);
    data
}

/// Pack top-down 8 bit rows into bottom-up stored rows padded to 4 bytes.
pub fn pack_rows_8bit(rows: &[Vec<u8>]) -> Vec<u8> {
    let mut data = Vec::new();
    for row in rows.iter().rev() {
        data.extend_from_slice(row);
        data.resize(data.len() + (4 - row.len() % 4) % 4, 0);
    }
    data
}

/// The two-tone pink palette used by the font strips, padded to 256 distinct entries.
pub fn strip_palette() -> Vec<[u8; 3]> {
    let mut palette = vec![[0xF8, 0x90, 0xC8], [0xFC, 0xD8, 0xEC]];
    for i in 2..256u32 {
        palette.push([i as u8, (255 - i) as u8, (i * 3 % 256) as u8]);
    }
    palette
}

/// Deterministic glyph-like pattern using indices 0 and 1.
pub fn strip_rows(width: usize, height: usize) -> Vec<Vec<u8>> {
    (0..height).map(|y| (0..width).map(|x| ((x * 7 + y * 3) % 5 == 0) as u8).collect()).collect()
}

pub fn flatten(rows: &[Vec<u8>]) -> Vec<u8> {
    rows.iter().flatten().copied().collect()
}
