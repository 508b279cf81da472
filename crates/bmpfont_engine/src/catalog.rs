//! Workspace scanning for `char*.bmp` strips.

use std::{
    num::ParseIntError,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{EngineError, Result};

pub const STRIP_PREFIX: &str = "char";
pub const STRIP_EXTENSION: &str = "bmp";

/// A strip file found in the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub path: PathBuf,
    /// Catalog index from the file name (`char0001.bmp` -> 1), or the positional fallback
    pub index: usize,
}

impl CatalogEntry {
    pub fn file_name(&self) -> String {
        self.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    }
}

/// Parse the numeric part of a strip file stem (`char0042` -> 42).
pub fn parse_catalog_index(stem: &str) -> std::result::Result<usize, ParseIntError> {
    stem.strip_prefix(STRIP_PREFIX).unwrap_or(stem).parse::<usize>()
}

/// Whether a file name looks like a strip: `char*.bmp`.
///
/// The prefix is case-sensitive, the extension is not: strips written by
/// Windows tools as `char0001.BMP` belong to the same catalog.
pub fn is_strip_file_name(name: &str) -> bool {
    let path = Path::new(name);
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(STRIP_EXTENSION));
    name.starts_with(STRIP_PREFIX) && has_extension
}

/// List all strips directly inside `dir`, sorted by file name.
///
/// An empty list is not an error.
pub fn scan_workspace(dir: impl AsRef<Path>) -> Result<Vec<CatalogEntry>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| EngineError::open_file(dir, e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if is_strip_file_name(name) {
            paths.push(entry.into_path());
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let entries = paths
        .into_iter()
        .enumerate()
        .map(|(position, path)| {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let index = match parse_catalog_index(stem) {
                Ok(index) => index,
                Err(err) => {
                    log::debug!("Can't parse catalog index from '{}' ({}), using position {}", stem, err, position + 1);
                    position + 1
                }
            };
            CatalogEntry { path, index }
        })
        .collect();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_index() {
        assert_eq!(parse_catalog_index("char0001"), Ok(1));
        assert_eq!(parse_catalog_index("char255"), Ok(255));
        assert!(parse_catalog_index("char_bold").is_err());
        assert!(parse_catalog_index("char").is_err());
    }

    #[test]
    fn test_is_strip_file_name() {
        assert!(is_strip_file_name("char0001.bmp"));
        assert!(is_strip_file_name("charx.bmp"));
        assert!(!is_strip_file_name("char0001.png"));
        assert!(!is_strip_file_name("font0001.bmp"));
        assert!(!is_strip_file_name("char0001"));
    }

    #[test]
    fn test_upper_case_extension_is_a_strip() {
        assert!(is_strip_file_name("char0001.BMP"));
        assert!(is_strip_file_name("char0001.Bmp"));
        assert!(!is_strip_file_name("CHAR0001.bmp"));
    }
}
