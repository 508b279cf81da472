use serde::{Deserialize, Serialize};

use crate::DEFAULT_ZOOM;

/// Persisted editor defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Screen pixels per grid cell
    pub zoom: u32,
    /// Palette index painted by new strokes
    pub color_index: u8,
    pub show_grid: bool,
    pub show_char_labels: bool,
    /// Glyph height override; inferred from the image height when unset
    pub char_height: Option<u32>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            color_index: 1,
            show_grid: true,
            show_char_labels: true,
            char_height: None,
        }
    }
}
