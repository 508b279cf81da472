use std::path::Path;

use anyhow::bail;
use bmpfont_engine::{glyph_label, IndexedGrid};
use bmpfont_engine_edit::EditorOptions;

use super::open_document;

pub fn run(path: &Path, glyph: Option<u32>, options: &EditorOptions) -> anyhow::Result<()> {
    let document = open_document(path)?;
    let strip = document.strip();

    let glyphs = match glyph {
        Some(glyph) if glyph >= strip.num_chars() => {
            bail!("Glyph {} is out of range, the strip has {} glyphs", glyph, strip.num_chars())
        }
        Some(glyph) => glyph..glyph + 1,
        None => 0..strip.num_chars(),
    };

    let grid = document.grid();
    for glyph in glyphs {
        let Some(rows) = strip.glyph_rows(glyph) else {
            continue;
        };
        if options.show_char_labels {
            println!("{}", glyph_label(glyph));
        }
        if options.show_grid {
            println!("{}", rule(grid.width()));
        }
        for y in rows {
            println!("{}", render_row(grid, y, options.show_grid));
        }
        if options.show_grid {
            println!("{}", rule(grid.width()));
        }
    }
    Ok(())
}

fn render_row(grid: &IndexedGrid, y: u32, framed: bool) -> String {
    let cells: String = grid.row(y).iter().map(|&index| index_char(index)).collect();
    if framed {
        format!("|{cells}|")
    } else {
        cells
    }
}

/// Top or bottom border of a framed glyph
fn rule(width: u32) -> String {
    format!("+{}+", "-".repeat(width as usize))
}

/// `.` for 0, `#` for 1, base 36 digits above that
fn index_char(index: u8) -> char {
    match index {
        0 => '.',
        1 => '#',
        _ => char::from_digit(index as u32, 36).unwrap_or('?'),
    }
}
