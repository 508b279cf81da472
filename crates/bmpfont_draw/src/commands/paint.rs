use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use bmpfont_engine_edit::{EditState, UndoState};

use super::open_document;
use crate::Settings;

pub struct PaintOptions {
    pub color: Option<u8>,
    pub zoom: Option<i64>,
    pub strokes: Vec<String>,
    pub cells: bool,
    pub undo: bool,
    pub output: Option<PathBuf>,
}

pub fn run(path: &Path, options: PaintOptions, settings: &mut Settings) -> anyhow::Result<()> {
    let strokes = options
        .strokes
        .iter()
        .map(|s| parse_stroke(s))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut state = EditState::with_options(open_document(path)?, &settings.editor);
    if let Some(zoom) = options.zoom {
        state.set_zoom(zoom);
    }
    if let Some(color) = options.color {
        state.set_color(color)?;
    }
    let zoom = state.zoom() as i32;
    let (view_width, view_height) = state.surface().view_size(state.grid());
    log::debug!("Pointer coordinates address a {}x{} view at zoom {}", view_width, view_height, zoom);

    let (mut painted, mut changed) = (0, 0);
    for stroke in &strokes {
        let mut points = stroke.iter().map(|&(x, y)| if options.cells { to_pointer(x, y, zoom) } else { (x, y) });
        let mut writes = Vec::new();
        if let Some((px, py)) = points.next() {
            writes.extend(state.pointer_pressed(px, py));
        }
        for (px, py) in points {
            writes.extend(state.pointer_moved(px, py));
        }
        state.pointer_released();
        painted += writes.len();
        changed += writes.iter().filter(|w| w.is_modification()).count();
    }
    log::info!("Replayed {} strokes, {} cell writes at zoom {}", strokes.len(), painted, zoom);

    if options.undo {
        match state.undo_description() {
            Some(description) => {
                state.undo()?;
                println!("Undid: {description}");
            }
            None => log::warn!("Nothing to undo"),
        }
    }

    let target = options.output.unwrap_or_else(|| path.to_path_buf());
    state.save_as(&target).with_context(|| format!("Failed to save '{}'", target.display()))?;
    settings.add_recent_file(&target);

    println!(
        "Painted {painted} cells ({changed} changed) with color {}, saved '{}'",
        state.color_index(),
        target.display()
    );
    Ok(())
}

/// Top left screen pixel of a cell
fn to_pointer(x: i32, y: i32, zoom: i32) -> (i32, i32) {
    (x.saturating_mul(zoom), y.saturating_mul(zoom))
}

/// Parse `"x,y x,y ..."` into points.
fn parse_stroke(text: &str) -> anyhow::Result<Vec<(i32, i32)>> {
    let points = text
        .split_whitespace()
        .map(|point| {
            let Some((x, y)) = point.split_once(',') else {
                bail!("Invalid point '{point}', expected x,y");
            };
            let x = x.trim().parse::<i32>().with_context(|| format!("Invalid x in '{point}'"))?;
            let y = y.trim().parse::<i32>().with_context(|| format!("Invalid y in '{point}'"))?;
            Ok((x, y))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if points.is_empty() {
        bail!("Empty stroke");
    }
    Ok(points)
}
