//! Undo/Redo system for the strip editor
//!
//! Cell writes are applied immediately while the pointer moves; the finished
//! stroke is pushed afterwards with `push_plain_undo`.

use crate::{Result, UndoOperation, UndoStack, UndoState};

use super::EditState;

impl EditState {
    /// Push an undo operation without executing it
    pub(crate) fn push_plain_undo(&mut self, op: UndoOperation) {
        if op.changes_data() {
            self.document.mark_dirty();
        }
        self.undo_stack.push(op);
    }

    fn apply(&mut self, op: &UndoOperation, undo: bool) -> Result<()> {
        if op.changes_data() {
            self.document.mark_dirty();
        }
        match op {
            UndoOperation::Stroke { .. } if undo => op.undo_pixels(self.document.grid_mut()),
            UndoOperation::Stroke { .. } => op.redo_pixels(self.document.grid_mut()),
            UndoOperation::CharHeight { old, new } => {
                self.document.set_char_height(if undo { *old } else { *new });
                Ok(())
            }
        }
    }

    pub fn undo_stack_len(&self) -> usize {
        self.undo_stack.undo_len()
    }

    pub fn redo_stack_len(&self) -> usize {
        self.undo_stack.redo_len()
    }

    /// Mark as saved (clears dirty flag)
    pub fn mark_saved(&mut self) {
        self.document.mark_saved();
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo_stack
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// UndoState Trait Implementation
// ═══════════════════════════════════════════════════════════════════════════

impl UndoState for EditState {
    fn undo_description(&self) -> Option<String> {
        self.undo_stack.undo_description()
    }

    fn can_undo(&self) -> bool {
        self.undo_stack.can_undo() || !self.current_stroke.is_empty()
    }

    fn undo(&mut self) -> Result<()> {
        self.finish_stroke();
        let Some(op) = self.undo_stack.pop_undo() else {
            return Ok(());
        };
        let result = self.apply(&op, true);
        self.undo_stack.push_redo(op);
        result
    }

    fn redo_description(&self) -> Option<String> {
        self.undo_stack.redo_description()
    }

    fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }

    fn redo(&mut self) -> Result<()> {
        let Some(op) = self.undo_stack.pop_redo() else {
            return Ok(());
        };
        let result = self.apply(&op, false);
        self.undo_stack.push_redone(op);
        result
    }
}
