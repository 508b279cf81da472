//! The open document: palette, index grid and the strip view derived from them.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    codec::{codec_for_path, DecodedImage},
    CharacterStrip, EngineError, IndexedCodec, IndexedGrid, Palette, Result,
};

/// A decoded bitmap strip together with the palette captured at load time.
///
/// Only a palette read from the file itself is captured. Direct color sources
/// get a converted palette for display and color selection, but can not be saved.
///
/// Opening another file replaces the whole document; there is no merging and
/// no multi-document state.
#[derive(Debug, Clone)]
pub struct FontDocument {
    path: Option<PathBuf>,
    palette: Option<Palette>,
    converted_palette: Option<Palette>,
    grid: IndexedGrid,
    strip: CharacterStrip,
    is_dirty: bool,
}

impl FontDocument {
    /// Document from an existing grid. Without a palette it can be edited but not saved.
    pub fn new(grid: IndexedGrid, palette: Option<Palette>) -> Self {
        Self {
            path: None,
            palette,
            converted_palette: None,
            strip: CharacterStrip::from_image_height(grid.height()),
            grid,
            is_dirty: false,
        }
    }

    /// Load a bitmap with the codec matching its file name
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::load_with(codec_for_path(path), path)
    }

    pub fn load_with(codec: &dyn IndexedCodec, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| EngineError::open_file(path, e.to_string()))?;
        let mut document = Self::from_bytes(codec, &data)?;
        document.path = Some(path.to_path_buf());
        log::info!(
            "Opened '{}' ({}x{}, {} palette entries, {} glyphs of {}px)",
            path.display(),
            document.grid.width(),
            document.grid.height(),
            document.display_palette().map_or(0, Palette::len),
            document.strip.num_chars(),
            document.strip.char_height()
        );
        if document.palette.is_none() {
            log::warn!("'{}' is not palette-indexed, it can be edited but not saved", path.display());
        }
        Ok(document)
    }

    pub fn from_bytes(codec: &dyn IndexedCodec, data: &[u8]) -> Result<Self> {
        Ok(Self::from_decoded(codec.decode(data)?))
    }

    pub fn from_decoded(decoded: DecodedImage) -> Self {
        if decoded.palette_from_source {
            Self::new(decoded.grid, Some(decoded.palette))
        } else {
            let mut document = Self::new(decoded.grid, None);
            document.converted_palette = Some(decoded.palette);
            document
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The palette captured from the source file. Saving requires it.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Palette for showing and picking colors: the captured one, or the
    /// one computed when a direct color source was converted.
    pub fn display_palette(&self) -> Option<&Palette> {
        self.palette.as_ref().or(self.converted_palette.as_ref())
    }

    /// Whether the palette came from the file, so the document can be saved
    pub fn has_source_palette(&self) -> bool {
        self.palette.is_some()
    }

    pub fn grid(&self) -> &IndexedGrid {
        &self.grid
    }

    /// Mutable grid access for the edit layer. Callers report changes with [`Self::mark_dirty`].
    pub fn grid_mut(&mut self) -> &mut IndexedGrid {
        &mut self.grid
    }

    pub fn strip(&self) -> &CharacterStrip {
        &self.strip
    }

    /// Override the glyph height, or go back to the inferred one with `None`.
    pub fn set_char_height(&mut self, char_height: Option<u32>) {
        let height = self.grid.height();
        self.strip = match char_height {
            Some(char_height) => CharacterStrip::with_char_height(height, char_height),
            None => CharacterStrip::from_image_height(height),
        };
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    pub fn mark_saved(&mut self) {
        self.is_dirty = false;
    }

    /// Encode with the palette captured at load time.
    pub fn encode_to_vec(&self, codec: &dyn IndexedCodec) -> Result<Vec<u8>> {
        let palette = self.palette.as_ref().ok_or(EngineError::NoPalette)?;
        codec.encode(&self.grid, palette)
    }

    /// Overwrite the file the document was loaded from
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(EngineError::NoFilePath)?;
        self.save_as(path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.save_with(codec_for_path(path), path)
    }

    pub fn save_with(&mut self, codec: &dyn IndexedCodec, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.encode_to_vec(codec)?;
        write_atomically(path, &data)?;
        log::info!("Saved '{}' ({} bytes)", path.display(), data.len());
        self.path = Some(path.to_path_buf());
        self.is_dirty = false;
        Ok(())
    }
}

/// Write to a temporary sibling first, then rename over the target.
fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| EngineError::write_file(path, "invalid file name"))?;
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    if let Err(err) = fs::write(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(EngineError::write_file(path, err.to_string()));
    }
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(EngineError::write_file(path, err.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_without_palette_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut document = FontDocument::new(IndexedGrid::new(8, 8), None);
        let result = document.save_as(dir.path().join("char0001.bmp"));
        assert!(matches!(result, Err(EngineError::NoPalette)));
        assert!(!dir.path().join("char0001.bmp").exists());
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut document = FontDocument::new(IndexedGrid::new(8, 8), Some(Palette::from_rgb_bytes(&[0, 0, 0]).unwrap()));
        assert!(matches!(document.save(), Err(EngineError::NoFilePath)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = FontDocument::load("/nonexistent/char0001.bmp");
        let err = result.unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_char_height_override() {
        let mut document = FontDocument::new(IndexedGrid::new(8, 2048), None);
        assert_eq!(document.strip().char_height(), 8);
        document.set_char_height(Some(16));
        assert_eq!(document.strip().num_chars(), 128);
        document.set_char_height(None);
        assert_eq!(document.strip().num_chars(), 256);
    }
}
