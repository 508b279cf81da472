//! Undo operations for strip editing

use bmpfont_engine::IndexedGrid;
use serde::{Deserialize, Serialize};

use crate::{PixelChange, Result};

/// Type of operation for grouping related undos
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    /// Pixel editing (drawing)
    EditPixels,
    /// View-only changes that never touch the bitmap
    View,
}

/// Serializable undo operation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum UndoOperation {
    /// All cell writes of one pointer stroke, in the order they happened
    Stroke { color_index: u8, changes: Vec<PixelChange> },

    /// Glyph height override (`None` = inferred)
    CharHeight { old: Option<u32>, new: Option<u32> },
}

impl UndoOperation {
    /// Description of this operation for display
    pub fn description(&self) -> String {
        match self {
            UndoOperation::Stroke { color_index, changes } if changes.len() == 1 => format!("Paint pixel with color {color_index}"),
            UndoOperation::Stroke { color_index, changes } => format!("Paint {} pixels with color {color_index}", changes.len()),
            UndoOperation::CharHeight { .. } => "Change glyph height".to_string(),
        }
    }

    pub fn operation_type(&self) -> OperationType {
        match self {
            UndoOperation::Stroke { .. } => OperationType::EditPixels,
            UndoOperation::CharHeight { .. } => OperationType::View,
        }
    }

    /// Whether this operation changes data (affects dirty flag)
    pub fn changes_data(&self) -> bool {
        self.operation_type() == OperationType::EditPixels
    }

    /// Restore the old indices, last write first.
    pub(crate) fn undo_pixels(&self, grid: &mut IndexedGrid) -> Result<()> {
        if let UndoOperation::Stroke { changes, .. } = self {
            for change in changes.iter().rev() {
                grid.set_pixel(change.x as i32, change.y as i32, change.old_index);
            }
        }
        Ok(())
    }

    pub(crate) fn redo_pixels(&self, grid: &mut IndexedGrid) -> Result<()> {
        if let UndoOperation::Stroke { changes, .. } = self {
            for change in changes {
                grid.set_pixel(change.x as i32, change.y as i32, change.new_index);
            }
        }
        Ok(())
    }
}
