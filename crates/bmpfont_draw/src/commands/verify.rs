use std::path::Path;

use anyhow::{bail, Context};
use bmpfont_engine::{BmpCodec, IndexedCodec};

pub fn run(path: &Path) -> anyhow::Result<()> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    let decoded = BmpCodec.decode(&data).with_context(|| format!("Failed to decode '{}'", path.display()))?;
    if !decoded.palette_from_source {
        bail!("'{}' is not palette-indexed, there is no palette to preserve", path.display());
    }
    let (palette, grid) = decoded.into_parts();

    let encoded = BmpCodec.encode(&grid, &palette)?;
    let (palette2, grid2) = BmpCodec.decode(&encoded).context("Failed to decode re-encoded bitmap")?.into_parts();

    if palette2 != palette {
        bail!("Palette changed during round trip ({} -> {} entries)", palette.len(), palette2.len());
    }
    if grid2 != grid {
        let first = grid.pixels().iter().zip(grid2.pixels()).position(|(a, b)| a != b);
        bail!("Pixel indices changed during round trip (first difference at offset {:?})", first);
    }

    let reencoded = BmpCodec.encode(&grid2, &palette2)?;
    if reencoded != encoded {
        bail!("Encoding is not stable across two saves");
    }

    log::info!("Verified '{}'", path.display());
    println!(
        "OK: '{}' {}x{}, {} palette entries survive a round trip unchanged",
        path.display(),
        grid.width(),
        grid.height(),
        palette.len()
    );
    Ok(())
}
