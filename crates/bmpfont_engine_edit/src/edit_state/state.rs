//! Edit State
//!
//! The state container for editing one strip. It owns the open
//! [`FontDocument`], the [`EditSurface`] that turns pointer input into cell
//! writes, and the undo history.
//!
//! ## Undo/Redo System
//!
//! - Every cell written during one stroke is collected and pushed as a single
//!   undo step when the stroke ends
//! - Undo restores the old indices in reverse order, redo re-applies them
//! - A new stroke clears the redo stack
//! - The dirty flag is set by any data changing operation and cleared on save
//!
//! Opening another file replaces document, history and stroke state wholesale.

use std::path::Path;

use bmpfont_engine::{CharacterStrip, FontDocument, IndexedGrid, Palette};

use crate::{EditSurface, EditorOptions, PixelChange, Result, UndoStack};

// ═══════════════════════════════════════════════════════════════════════════
// Edit State
// ═══════════════════════════════════════════════════════════════════════════

/// Main state container for strip editing
///
/// The UI layer should only read from this state and call methods to modify it.
pub struct EditState {
    /// The open document
    pub(crate) document: FontDocument,

    /// Zoom, selected color, stroke and hover state
    pub(crate) surface: EditSurface,

    /// Cell writes of the stroke in progress
    pub(crate) current_stroke: Vec<PixelChange>,

    pub(crate) undo_stack: UndoStack,
}

impl EditState {
    // ═══════════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════════

    pub fn new(document: FontDocument) -> Self {
        let mut state = Self {
            document,
            surface: EditSurface::new(),
            current_stroke: Vec::new(),
            undo_stack: UndoStack::new(),
        };
        if !state.is_valid_color(state.surface.color_index()) {
            state.surface.set_color_index(0);
        }
        state
    }

    /// Create a state and apply persisted editor defaults.
    ///
    /// A default color outside the document palette falls back to index 0.
    pub fn with_options(document: FontDocument, options: &EditorOptions) -> Self {
        let mut state = Self::new(document);
        state.apply_options(options);
        state
    }

    /// Load a file into a new state
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(FontDocument::load(path)?))
    }

    /// Load a file and replace the current document with it.
    ///
    /// On failure the current document stays open.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let document = FontDocument::load(path)?;
        self.replace(document);
        Ok(())
    }

    /// Replace the document. Stroke, hover and undo history are reset; zoom and color are kept
    /// as long as the color is valid for the new palette.
    pub fn replace(&mut self, document: FontDocument) {
        if self.document.is_dirty() {
            log::warn!("Discarding unsaved changes to {}", display_path(&self.document));
        }
        self.document = document;
        self.surface.pointer_released();
        self.surface.pointer_left();
        self.current_stroke.clear();
        self.undo_stack.clear();

        let color = self.surface.color_index();
        if !self.is_valid_color(color) {
            self.surface.set_color_index(0);
        }
    }

    pub(crate) fn apply_options(&mut self, options: &EditorOptions) {
        self.surface.set_zoom(options.zoom as i64);
        if self.set_color(options.color_index).is_err() {
            log::warn!("Default color {} is not in the palette, using 0", options.color_index);
            self.surface.set_color_index(0);
        }
        if options.char_height.is_some() {
            self.document.set_char_height(options.char_height);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Getters
    // ═══════════════════════════════════════════════════════════════════════

    pub fn document(&self) -> &FontDocument {
        &self.document
    }

    /// Take the document out of the state
    pub fn into_document(mut self) -> FontDocument {
        self.finish_stroke();
        self.document
    }

    pub fn grid(&self) -> &IndexedGrid {
        self.document.grid()
    }

    /// The palette captured at load time
    pub fn palette(&self) -> Option<&Palette> {
        self.document.palette()
    }

    pub fn strip(&self) -> &CharacterStrip {
        self.document.strip()
    }

    pub fn surface(&self) -> &EditSurface {
        &self.surface
    }

    /// Whether the document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // File State
    // ═══════════════════════════════════════════════════════════════════════

    /// Overwrite the loaded file. A stroke in progress is committed first.
    pub fn save(&mut self) -> Result<()> {
        self.finish_stroke();
        self.document.save()
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.finish_stroke();
        self.document.save_as(path)
    }
}

pub(crate) fn display_path(document: &FontDocument) -> String {
    document
        .path()
        .map(|p| format!("'{}'", p.display()))
        .unwrap_or_else(|| "untitled document".to_string())
}
