//! Pixel edit surface
//!
//! Maps pointer positions on the zoomed view to grid cells and turns pointer
//! input into cell writes. Every grid cell is drawn as a `zoom × zoom` square.

use bmpfont_engine::{CharacterStrip, IndexedGrid};
use serde::{Deserialize, Serialize};

use crate::{paint_cell, PixelChange, StrokeState};

pub const DEFAULT_ZOOM: u32 = 20;
pub const MIN_ZOOM: u32 = 5;
pub const MAX_ZOOM: u32 = 50;
/// Zoom change per `zoom_in` / `zoom_out`
pub const ZOOM_STEP: u32 = 5;

/// Map a pointer position to a cell.
///
/// Uses floor division, so positions left of or above the view land on
/// negative cells instead of being folded onto row/column 0.
pub fn pointer_to_cell(px: i32, py: i32, zoom: u32) -> (i32, i32) {
    let zoom = zoom.clamp(1, i32::MAX as u32) as i32;
    (px.div_euclid(zoom), py.div_euclid(zoom))
}

/// Inclusive zoom limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: u32,
    pub max: u32,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: MIN_ZOOM, max: MAX_ZOOM }
    }
}

impl ZoomRange {
    /// Limits are normalized so that `1 <= min <= max`.
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.max(1);
        Self { min, max: max.max(min) }
    }

    pub fn clamp(&self, zoom: i64) -> u32 {
        zoom.clamp(self.min as i64, self.max as i64) as u32
    }
}

/// View and input state of the pixel editor.
#[derive(Debug, Clone)]
pub struct EditSurface {
    zoom: u32,
    zoom_range: ZoomRange,
    color_index: u8,
    stroke: StrokeState,
    hover_cell: Option<(i32, i32)>,
}

impl Default for EditSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSurface {
    pub fn new() -> Self {
        Self::with_zoom_range(ZoomRange::default())
    }

    pub fn with_zoom_range(zoom_range: ZoomRange) -> Self {
        Self {
            zoom: zoom_range.clamp(DEFAULT_ZOOM as i64),
            zoom_range,
            color_index: 1,
            stroke: StrokeState::Idle,
            hover_cell: None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Zoom
    // ═══════════════════════════════════════════════════════════════════════

    /// Screen pixels per grid cell
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    /// Set the zoom level, clamped to the zoom range. Returns the level in effect.
    pub fn set_zoom(&mut self, zoom: i64) -> u32 {
        self.zoom = self.zoom_range.clamp(zoom);
        self.zoom
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.set_zoom(self.zoom as i64 + ZOOM_STEP as i64)
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.set_zoom(self.zoom as i64 - ZOOM_STEP as i64)
    }

    /// Size of the zoomed view of `grid` in screen pixels
    pub fn view_size(&self, grid: &IndexedGrid) -> (u64, u64) {
        (grid.width() as u64 * self.zoom as u64, grid.height() as u64 * self.zoom as u64)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Color
    // ═══════════════════════════════════════════════════════════════════════

    /// Palette index painted by strokes
    pub fn color_index(&self) -> u8 {
        self.color_index
    }

    /// Unchecked; [`crate::EditState::set_color`] validates against the palette.
    pub fn set_color_index(&mut self, color_index: u8) {
        self.color_index = color_index;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Pointer input
    // ═══════════════════════════════════════════════════════════════════════

    pub fn stroke(&self) -> StrokeState {
        self.stroke
    }

    pub fn cell_at(&self, px: i32, py: i32) -> (i32, i32) {
        pointer_to_cell(px, py, self.zoom)
    }

    /// Begin a stroke and paint the pressed cell.
    pub fn pointer_pressed(&mut self, grid: &mut IndexedGrid, px: i32, py: i32) -> Option<PixelChange> {
        let cell = self.cell_at(px, py);
        self.hover_cell = Some(cell);
        let (x, y) = self.stroke.press(cell);
        paint_cell(grid, x, y, self.color_index)
    }

    /// Track hover and, while a stroke is active, paint a newly entered cell.
    pub fn pointer_moved(&mut self, grid: &mut IndexedGrid, px: i32, py: i32) -> Option<PixelChange> {
        let cell = self.cell_at(px, py);
        self.hover_cell = Some(cell);
        let (x, y) = self.stroke.enter(cell)?;
        paint_cell(grid, x, y, self.color_index)
    }

    /// End the stroke. Returns whether one was active.
    pub fn pointer_released(&mut self) -> bool {
        self.stroke.release()
    }

    /// Pointer left the view: the hover highlight goes away.
    pub fn pointer_left(&mut self) {
        self.hover_cell = None;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Hover
    // ═══════════════════════════════════════════════════════════════════════

    pub fn hover_cell(&self) -> Option<(i32, i32)> {
        self.hover_cell
    }

    /// Grid row under the pointer
    pub fn hovered_row(&self) -> Option<i32> {
        self.hover_cell.map(|(_, y)| y)
    }

    /// Glyph whose rows contain the hovered row
    pub fn hovered_glyph(&self, strip: &CharacterStrip) -> Option<u32> {
        strip.glyph_at_row(self.hovered_row()?)
    }
}
