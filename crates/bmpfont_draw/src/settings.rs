use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use bmpfont_engine_edit::EditorOptions;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// =============================================================================
// Project directory constants
// =============================================================================

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "GitHub";
const PROJECT_APPLICATION: &str = "bmpfont_draw";

/// Lazily initialized project directories (computed once on first access)
pub(crate) static PROJECT_DIRS: Lazy<Option<directories::ProjectDirs>> =
    Lazy::new(|| directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION));

/// Persisted options, stored in `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Default workspace directory
    #[serde(default)]
    pub workspace: Option<PathBuf>,

    #[serde(default)]
    pub editor: EditorOptions,

    /// Most recently saved strips, newest first
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
}

impl Settings {
    pub const FILE_NAME: &'static str = "settings.toml";
    pub const MAX_RECENT_FILES: usize = 10;

    pub fn load() -> Self {
        let Some(config_dir) = Self::config_dir() else {
            return Self::default();
        };

        if !config_dir.exists() {
            if let Err(err) = fs::create_dir_all(&config_dir) {
                log::error!("Can't create configuration directory {:?}: {}", config_dir, err);
                return Self::default();
            }
        }
        Self::load_from(&config_dir.join(Self::FILE_NAME))
    }

    /// Read a settings file; a missing or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(txt) => match toml::from_str::<Settings>(&txt) {
                Ok(settings) => return settings,
                Err(err) => log::error!("Error parsing settings file {:?}: {}", path, err),
            },
            Err(err) => log::error!("Error reading settings file: {}", err),
        }
        Self::default()
    }

    pub fn store(&self) {
        let Some(file_path) = Self::config_file() else {
            log::error!("Cannot determine config directory for saving settings");
            return;
        };
        if let Err(err) = self.store_to(&file_path) {
            log::error!("Error storing settings: {}", err);
        }
    }

    /// Atomically write settings to file (write to temp, then rename).
    pub fn store_to(&self, file_path: &Path) -> anyhow::Result<()> {
        let file_name = file_path.file_name().and_then(|n| n.to_str()).unwrap_or(Self::FILE_NAME);
        let temp_path = file_path.with_file_name(format!(".{file_name}.tmp"));
        let text = toml::to_string_pretty(self)?;

        let write_result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
            Ok(())
        })();

        if let Err(err) = write_result {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&temp_path, file_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }

    /// Move `path` to the front of the recent file list.
    pub fn add_recent_file(&mut self, path: &Path) {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.recent_files.retain(|p| *p != path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(Self::MAX_RECENT_FILES);
    }

    /// Workspace to use: command line, then settings, then the current directory.
    pub fn resolve_workspace(&self, from_args: Option<PathBuf>) -> PathBuf {
        from_args
            .or_else(|| self.workspace.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn config_dir() -> Option<PathBuf> {
        PROJECT_DIRS.as_ref().map(|p| p.config_dir().to_path_buf())
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(Self::FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);

        let mut settings = Settings::default();
        settings.workspace = Some(PathBuf::from("/fonts"));
        settings.editor.zoom = 35;
        settings.editor.char_height = Some(9);
        settings.store_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
        assert!(!dir.path().join(".settings.toml.tmp").exists());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load_from(&dir.path().join("missing.toml")), Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        fs::write(&path, "editor = [[[").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        fs::write(&path, "[editor]\nzoom = 10\n").unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.editor.zoom, 10);
        assert_eq!(settings.editor.color_index, 1);
        assert!(settings.editor.show_grid);
        assert_eq!(settings.workspace, None);
    }

    #[test]
    fn test_recent_files() {
        let mut settings = Settings::default();
        for i in 0..12 {
            settings.add_recent_file(Path::new(&format!("/nonexistent/char{i:04}.bmp")));
        }
        settings.add_recent_file(Path::new("/nonexistent/char0005.bmp"));
        assert_eq!(settings.recent_files.len(), Settings::MAX_RECENT_FILES);
        assert_eq!(settings.recent_files[0], PathBuf::from("/nonexistent/char0005.bmp"));
        assert_eq!(settings.recent_files.iter().filter(|p| p.ends_with("char0005.bmp")).count(), 1);
    }

    #[test]
    fn test_resolve_workspace() {
        let mut settings = Settings::default();
        assert_eq!(settings.resolve_workspace(None), PathBuf::from("."));
        settings.workspace = Some(PathBuf::from("/fonts"));
        assert_eq!(settings.resolve_workspace(None), PathBuf::from("/fonts"));
        assert_eq!(settings.resolve_workspace(Some(PathBuf::from("x"))), PathBuf::from("x"));
    }
}
