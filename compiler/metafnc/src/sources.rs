//! Source discovery on disk.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::CliError;

const EXTENSION: &str = "java";

/// Java sources under `path`, sorted by path.
///
/// A file is returned as is if it has the `.java` extension. Directories
/// are walked recursively, skipping hidden directories and `target`.
pub fn java_files(path: &Path) -> Result<Vec<PathBuf>, CliError> {
    if path.is_file() {
        if is_java(path) {
            return Ok(vec![path.to_path_buf()]);
        }
        warn!(path = %path.display(), "skipping non-Java source");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry))
    {
        let entry = entry.map_err(|source| CliError::Walk {
            path: path.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_java(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_java(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == EXTENSION)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "target"
}
