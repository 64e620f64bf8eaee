//! File discovery for finding Rust files containing SearchIndexed types.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::errors::{GenerateError, GenerateResult};

/// Discovered source file with basic metadata
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: String,
}

/// Discover all Rust files under `root` that mention `SearchIndexed`.
///
/// Hidden directories are skipped. A missing root yields no files; the caller reports
/// the empty result as a discovery failure. Any entry that cannot be walked (a dangling
/// symlink, an unreadable directory, a link loop) fails the scan.
pub fn discover_source_files(root: &Path) -> GenerateResult<Vec<DiscoveredFile>> {
    let mut discovered = Vec::new();

    if !root.exists() {
        return Ok(discovered);
    }

    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry.map_err(|err| GenerateError::Scan {
            path: err.path().unwrap_or(root).to_path_buf(),
            message: err.to_string(),
        })?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }

        if file_mentions_derive(path)? {
            let relative = path.strip_prefix(root).unwrap_or(path);
            discovered.push(DiscoveredFile {
                path: path.to_path_buf(),
                relative_path: relative.to_string_lossy().to_string(),
            });
        }
    }

    // Sort by relative path for consistent ordering
    discovered.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok(discovered)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Quick text check before doing full parsing.
fn file_mentions_derive(path: &Path) -> GenerateResult<bool> {
    let content = std::fs::read_to_string(path).map_err(|err| GenerateError::Scan {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(content.contains("SearchIndexed"))
}
