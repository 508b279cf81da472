use std::path::Path;

use bmpfont_engine::glyph_label;
use bmpfont_engine_edit::EditorOptions;

use super::open_document;

pub fn run(path: &Path, char_height: Option<u32>, options: &EditorOptions) -> anyhow::Result<()> {
    let mut document = open_document(path)?;
    if char_height.is_some() {
        document.set_char_height(char_height);
    }
    let (width, height) = document.grid().size();
    let strip = document.strip();

    println!("File:        {}", path.display());
    println!("Size:        {width}x{height}");
    println!(
        "Char height: {}px ({})",
        strip.char_height(),
        if strip.is_override() { "override" } else { "inferred" }
    );
    println!("Glyphs:      {} (ASCII 0-{})", strip.num_chars(), strip.num_chars().saturating_sub(1));

    if let Some(palette) = document.display_palette() {
        if document.has_source_palette() {
            println!("Palette:     {} entries", palette.len());
        } else {
            println!("Palette:     {} entries (converted from direct color, can't be saved)", palette.len());
        }
        for (index, color) in palette.colors().iter().enumerate() {
            let (r, g, b) = color.get_rgb();
            println!("  {index:>3}: {} ({r:>3}, {g:>3}, {b:>3})", color.to_hex());
        }
    }

    if !options.show_char_labels {
        return Ok(());
    }
    println!("Glyph rows:");
    for glyph in 0..strip.num_chars() {
        if let Some(rows) = strip.glyph_rows(glyph) {
            println!("  {:<24} rows {}..{}", glyph_label(glyph), rows.start, rows.end);
        }
    }
    Ok(())
}
