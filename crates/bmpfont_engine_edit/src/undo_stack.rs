//! Undo stack for strip editing

use crate::{Result, UndoOperation};

/// Trait for types that support undo/redo operations
pub trait UndoState {
    /// Get description of the next undo operation
    fn undo_description(&self) -> Option<String>;

    /// Check if undo is available
    fn can_undo(&self) -> bool;

    /// Perform undo operation
    fn undo(&mut self) -> Result<()>;

    /// Get description of the next redo operation
    fn redo_description(&self) -> Option<String>;

    /// Check if redo is available
    fn can_redo(&self) -> bool;

    /// Perform redo operation
    fn redo(&mut self) -> Result<()>;
}

/// Undo and redo history
#[derive(Debug, Default)]
pub struct UndoStack {
    undo_stack: Vec<UndoOperation>,
    redo_stack: Vec<UndoOperation>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new operation; this invalidates everything that could be redone.
    pub fn push(&mut self, op: UndoOperation) {
        self.undo_stack.push(op);
        self.redo_stack.clear();
    }

    pub fn pop_undo(&mut self) -> Option<UndoOperation> {
        self.undo_stack.pop()
    }

    /// Push an undone operation onto the redo stack
    pub fn push_redo(&mut self, op: UndoOperation) {
        self.redo_stack.push(op);
    }

    pub fn pop_redo(&mut self) -> Option<UndoOperation> {
        self.redo_stack.pop()
    }

    /// Move a redone operation back to the undo stack without touching redo history
    pub(crate) fn push_redone(&mut self, op: UndoOperation) {
        self.undo_stack.push(op);
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(UndoOperation::description)
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(UndoOperation::description)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(new: u32) -> UndoOperation {
        UndoOperation::CharHeight { old: None, new: Some(new) }
    }

    #[test]
    fn test_push_clears_redo() {
        let mut stack = UndoStack::new();
        stack.push(op(8));
        let undone = stack.pop_undo().unwrap();
        stack.push_redo(undone);
        assert!(stack.can_redo());

        stack.push(op(9));
        assert!(!stack.can_redo());
        assert_eq!(stack.undo_len(), 1);
    }

    #[test]
    fn test_redone_keeps_redo_history() {
        let mut stack = UndoStack::new();
        stack.push(op(8));
        stack.push(op(9));
        for _ in 0..2 {
            let undone = stack.pop_undo().unwrap();
            stack.push_redo(undone);
        }
        let redone = stack.pop_redo().unwrap();
        stack.push_redone(redone);
        assert_eq!(stack.undo_len(), 1);
        assert_eq!(stack.redo_len(), 1);
    }
}
