//! File discovery inside a staging area.
//!
//! Walks the tree with `walkdir`, pruning excluded directory names at every
//! depth and keeping only files whose extension passes the filter. Results
//! are sorted by their `/`-separated relative path so output is reproducible
//! across runs and platforms.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

/// A file found below a staging root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub absolute: PathBuf,
    /// Path relative to the root, always `/`-separated.
    pub relative: String,
}

/// Lower-cased extension of `path` including the leading dot (`".py"`).
///
/// Returns `None` for names without an extension, including dot-files such
/// as `.bashrc`.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Walk `root` and return every file to process.
///
/// `ignore_names` are matched against directory names exactly; a match
/// prunes the whole subtree. When `extensions` is non-empty only files whose
/// lower-cased extension is a member are returned.
pub fn discover(
    root: &Path,
    ignore_names: &BTreeSet<String>,
    extensions: &BTreeSet<String>,
) -> Result<Vec<DiscoveredFile>> {
    fs::read_dir(root).map_err(|e| {
        Error::file_processing(format!("Failed to read directory {}", root.display()), e)
    })?;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry, ignore_names));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::file_processing(
                    format!("Failed to read directory {}", root.display()),
                    e,
                ));
            }
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if !extensions.is_empty() {
            match extension_of(entry.path()) {
                Some(ext) if extensions.contains(&ext) => {}
                _ => continue,
            }
        }

        let Some(relative) = relative_path(root, entry.path()) else {
            continue;
        };
        files.push(DiscoveredFile {
            absolute: entry.into_path(),
            relative,
        });
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    debug!("Discovered {} files under {}", files.len(), root.display());
    Ok(files)
}

/// The root is never pruned, whatever its name.
fn is_ignored_dir(entry: &DirEntry, ignore_names: &BTreeSet<String>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && ignore_names.contains(&*entry.file_name().to_string_lossy())
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let stripped = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
