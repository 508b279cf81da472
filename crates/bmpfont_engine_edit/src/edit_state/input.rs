//! Pointer input, color and view settings

use bmpfont_engine::{glyph_label, EngineError};

use crate::{PixelChange, Result, UndoOperation};

use super::EditState;

impl EditState {
    // ═══════════════════════════════════════════════════════════════════════
    // Pointer input
    // ═══════════════════════════════════════════════════════════════════════

    /// Begin a stroke at a pointer position and paint the pressed cell.
    ///
    /// A stroke that was never released is committed first.
    pub fn pointer_pressed(&mut self, px: i32, py: i32) -> Option<PixelChange> {
        self.finish_stroke();
        let change = self.surface.pointer_pressed(self.document.grid_mut(), px, py);
        self.record_change(change)
    }

    /// Update hover and continue an active stroke.
    pub fn pointer_moved(&mut self, px: i32, py: i32) -> Option<PixelChange> {
        let change = self.surface.pointer_moved(self.document.grid_mut(), px, py);
        self.record_change(change)
    }

    /// End the stroke. Returns whether an undo step was recorded.
    pub fn pointer_released(&mut self) -> bool {
        self.finish_stroke()
    }

    pub fn pointer_left(&mut self) {
        self.surface.pointer_left();
    }

    fn record_change(&mut self, change: Option<PixelChange>) -> Option<PixelChange> {
        let change = change?;
        self.document.mark_dirty();
        self.current_stroke.push(change);
        Some(change)
    }

    /// Release the stroke in progress and push it as one undo step.
    pub(crate) fn finish_stroke(&mut self) -> bool {
        self.surface.pointer_released();
        if self.current_stroke.is_empty() {
            return false;
        }
        let changes = std::mem::take(&mut self.current_stroke);
        log::debug!("Stroke finished with {} cell writes", changes.len());
        self.push_plain_undo(UndoOperation::Stroke {
            color_index: self.surface.color_index(),
            changes,
        });
        true
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Color
    // ═══════════════════════════════════════════════════════════════════════

    pub fn color_index(&self) -> u8 {
        self.surface.color_index()
    }

    /// Select the palette index painted by the next stroke
    pub fn set_color(&mut self, index: u8) -> Result<()> {
        if !self.is_valid_color(index) {
            return Err(EngineError::ColorIndexOutOfPalette {
                index,
                palette_len: self.document.display_palette().map_or(0, |p| p.len()),
            });
        }
        self.surface.set_color_index(index);
        Ok(())
    }

    /// Checked against the display palette; documents without any palette accept any index.
    pub fn is_valid_color(&self, index: u8) -> bool {
        self.document.display_palette().is_none_or(|p| p.contains_index(index))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // View
    // ═══════════════════════════════════════════════════════════════════════

    pub fn zoom(&self) -> u32 {
        self.surface.zoom()
    }

    pub fn set_zoom(&mut self, zoom: i64) -> u32 {
        self.surface.set_zoom(zoom)
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.surface.zoom_in()
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.surface.zoom_out()
    }

    /// Glyph under the pointer
    pub fn hovered_glyph(&self) -> Option<u32> {
        self.surface.hovered_glyph(self.document.strip())
    }

    /// Label of the glyph under the pointer, e.g. `#65 (ASCII 65: 'A')`
    pub fn hover_label(&self) -> Option<String> {
        self.hovered_glyph().map(glyph_label)
    }

    /// Override the glyph height, `None` goes back to the inferred height.
    pub fn set_char_height(&mut self, char_height: Option<u32>) {
        let old = self.current_char_height_override();
        if old == char_height {
            return;
        }
        self.document.set_char_height(char_height);
        self.push_plain_undo(UndoOperation::CharHeight { old, new: char_height });
    }

    pub(crate) fn current_char_height_override(&self) -> Option<u32> {
        let strip = self.document.strip();
        strip.is_override().then(|| strip.char_height())
    }
}
