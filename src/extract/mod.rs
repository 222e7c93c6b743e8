// Document text extraction: file listing and per-format extractors.

pub mod pptx;
pub mod traits;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Extension (compared case-insensitively) of the files we compare.
pub const PPTX_EXTENSION: &str = "pptx";

/// List the `.pptx` files directly inside `dir`, sorted by file name.
///
/// Not recursive. Sorting keeps row order stable across runs and platforms.
pub fn list_presentations(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Cannot read folder {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Cannot list folder {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && has_pptx_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_pptx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PPTX_EXTENSION))
}

/// The file name of `path` as shown in reports.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
