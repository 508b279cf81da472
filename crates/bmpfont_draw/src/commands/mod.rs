//! Command implementations. Each returns an `anyhow::Result`; `main` reports failures.

mod dump;
mod info;
mod list;
mod paint;
mod verify;

use std::path::{Path, PathBuf};

use anyhow::Context;
use bmpfont_engine::FontDocument;

use crate::{Args, Command, Settings};

pub fn run(args: Args, settings: &mut Settings) -> anyhow::Result<()> {
    let workspace = settings.resolve_workspace(args.workspace);
    match args.command {
        Command::List { dir } => list::run(&dir.unwrap_or(workspace)),
        Command::Info { file, char_height } => info::run(&resolve_file(&workspace, file), char_height, &settings.editor),
        Command::Paint {
            file,
            color,
            zoom,
            stroke,
            cells,
            undo,
            output,
        } => {
            let options = paint::PaintOptions {
                color,
                zoom,
                strokes: stroke,
                cells,
                undo,
                output,
            };
            paint::run(&resolve_file(&workspace, file), options, settings)
        }
        Command::Verify { file } => verify::run(&resolve_file(&workspace, file)),
        Command::Dump { file, glyph } => dump::run(&resolve_file(&workspace, file), glyph, &settings.editor),
    }
}

/// Relative file names are looked up in the workspace when they don't exist as given.
fn resolve_file(workspace: &Path, file: PathBuf) -> PathBuf {
    if file.is_relative() && !file.exists() {
        let candidate = workspace.join(&file);
        if candidate.exists() {
            return candidate;
        }
    }
    file
}

fn open_document(path: &Path) -> anyhow::Result<FontDocument> {
    FontDocument::load(path).with_context(|| format!("Failed to load '{}'", path.display()))
}
