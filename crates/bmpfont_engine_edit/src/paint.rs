use bmpfont_engine::IndexedGrid;
use serde::{Deserialize, Serialize};

/// One written cell, reported back to the caller instead of through a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelChange {
    pub x: u32,
    pub y: u32,
    pub old_index: u8,
    pub new_index: u8,
}

impl PixelChange {
    /// Whether the write actually changed the cell
    pub fn is_modification(&self) -> bool {
        self.old_index != self.new_index
    }
}

/// Write `color` into the cell at `(x, y)`.
///
/// Cells outside the grid are ignored and yield `None`. A write of the value
/// already in the cell still reports a change.
pub fn paint_cell(grid: &mut IndexedGrid, x: i32, y: i32, color: u8) -> Option<PixelChange> {
    let old_index = grid.set_pixel(x, y, color)?;
    Some(PixelChange {
        x: x as u32,
        y: y as u32,
        old_index,
        new_index: color,
    })
}
