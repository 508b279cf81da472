//! Shared test helpers for edit state tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use bmpfont_engine::{Color, FontDocument, IndexedGrid, Palette};
use bmpfont_engine_edit::EditState;

pub fn pink_palette() -> Palette {
    Palette::new(vec![Color::new(0xF8, 0x90, 0xC8), Color::new(0xFC, 0xD8, 0xEC)]).unwrap()
}

/// 8 wide strip of 256 glyphs, all index 0
pub fn create_test_document() -> FontDocument {
    FontDocument::new(IndexedGrid::new(8, 2048), Some(pink_palette()))
}

pub fn create_test_state() -> EditState {
    EditState::new(create_test_document())
}

/// Pointer position in the middle of a cell at the given zoom
pub fn cell_center(x: i32, y: i32, zoom: u32) -> (i32, i32) {
    let zoom = zoom as i32;
    (x * zoom + zoom / 2, y * zoom + zoom / 2)
}

/// Save a fresh strip to `dir` and return its path
pub fn write_test_strip(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut document = create_test_document();
    document.save_as(&path).unwrap();
    path
}

/// Write a 2x2 24 bpp bitmap (red and white pixels, no palette) to `dir`
pub fn write_true_color_bitmap(dir: &Path, name: &str) -> PathBuf {
    let pixel_data = [
        0, 0, 255, 255, 255, 255, 0, 0, //
        255, 255, 255, 0, 0, 255, 0, 0,
    ];
    let pixel_offset = 14 + 40;
    let mut data = Vec::new();
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&((pixel_offset + pixel_data.len()) as u32).to_le_bytes());
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(&(pixel_offset as u32).to_le_bytes());
    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&2i32.to_le_bytes());
    data.extend_from_slice(&2i32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&24u16.to_le_bytes());
    data.extend_from_slice(&[0; 24]);
    data.extend_from_slice(&pixel_data);

    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}
