//! Editing model for indexed bitmap font strips
//!
//! Provides the model layer of the editor, separated from any UI:
//! - `EditSurface` - pointer to cell mapping, zoom, stroke state and hover
//! - `EditState` - the open document plus surface and undo history
//! - Undo/redo of strokes
//! - `EditorOptions` - persisted editor defaults

mod edit_state;
mod options;
mod paint;
mod stroke;
mod surface;
mod undo_operation;
mod undo_stack;

pub use bmpfont_engine::{EngineError, Result};

pub use edit_state::EditState;
pub use options::EditorOptions;
pub use paint::{paint_cell, PixelChange};
pub use stroke::StrokeState;
pub use surface::{pointer_to_cell, EditSurface, ZoomRange, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
pub use undo_operation::{OperationType, UndoOperation};
pub use undo_stack::{UndoStack, UndoState};
