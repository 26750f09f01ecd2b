//! Entry name sanitization (zip-slip prevention).
//!
//! Archive entry names are untrusted. Before anything is written, a name is
//! normalized into a relative path that cannot leave the staging root.

use std::path::{Component, Path, PathBuf};

/// Outcome of sanitizing one archive entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPath {
    /// Relative path that stays below the staging root.
    Safe(PathBuf),
    /// Name resolves to the staging root itself (e.g. `./`); nothing to write.
    Root,
    /// Absolute name, drive prefix, or a `..` that climbs above the root.
    Unsafe,
}

/// Normalize an entry name into a path relative to the staging root.
///
/// Backslashes are treated as separators, `.` components are dropped and
/// `..` pops the previous component. Popping past the root, or any absolute
/// or prefixed name, makes the entry unsafe.
pub fn entry_path(name: &str) -> EntryPath {
    if name.contains('\0') {
        return EntryPath::Unsafe;
    }

    let unified = name.replace('\\', "/");
    if unified.starts_with('/') || has_drive_prefix(&unified) {
        return EntryPath::Unsafe;
    }

    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in Path::new(&unified).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return EntryPath::Unsafe;
                }
            }
            Component::RootDir | Component::Prefix(_) => return EntryPath::Unsafe,
        }
    }

    if parts.is_empty() {
        EntryPath::Root
    } else {
        EntryPath::Safe(parts.iter().collect())
    }
}

/// `C:` style prefixes are absolute on Windows even when written with `/`.
fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
