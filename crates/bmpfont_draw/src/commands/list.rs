use std::path::Path;

use anyhow::Context;
use bmpfont_engine::{scan_workspace, FontDocument};

pub fn run(dir: &Path) -> anyhow::Result<()> {
    let entries = scan_workspace(dir).with_context(|| format!("Failed to scan '{}'", dir.display()))?;
    if entries.is_empty() {
        log::warn!("No character bitmap files (char*.bmp) found in '{}'", dir.display());
        println!("No character bitmap files (char*.bmp) found in '{}'.", dir.display());
        return Ok(());
    }

    println!("{:>6}  {:<20} {:>10}  {:>6}  {:>6}", "index", "file", "size", "height", "glyphs");
    for entry in entries {
        match FontDocument::load(&entry.path) {
            Ok(document) => {
                let (width, height) = document.grid().size();
                println!(
                    "{:>6}  {:<20} {:>10}  {:>6}  {:>6}",
                    format!("#{}", entry.index),
                    entry.file_name(),
                    format!("{width}x{height}"),
                    document.strip().char_height(),
                    document.strip().num_chars()
                );
            }
            Err(err) => {
                log::warn!("Can't load '{}': {}", entry.path.display(), err);
                println!("{:>6}  {:<20} error: {}", format!("#{}", entry.index), entry.file_name(), err);
            }
        }
    }
    Ok(())
}
