//! Exclusively owned staging directory for one extracted archive.

use std::path::Path;

use tempfile::{Builder, TempDir};

use crate::error::{Error, Result};

/// Prefix of every staging directory name.
pub const STAGING_PREFIX: &str = "code2prompt-";

/// Directory holding the extracted contents of one archive.
///
/// Dropping the value removes the directory (best-effort). Call [`close`]
/// to remove it and observe failures as [`Error::TempFile`].
///
/// [`close`]: StagingArea::close
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
    extracted_files: usize,
    rejected_entries: Vec<String>,
}

impl StagingArea {
    /// Create a fresh, uniquely named staging directory.
    ///
    /// Uses `parent` when given, the OS temp directory otherwise.
    pub fn create(parent: Option<&Path>) -> Result<Self> {
        let mut builder = Builder::new();
        builder.prefix(STAGING_PREFIX);
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|e| Error::temp_file("Failed to create temporary directory", e))?;

        Ok(Self {
            dir,
            extracted_files: 0,
            rejected_entries: Vec::new(),
        })
    }

    /// Root of the extracted tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Number of regular files written during extraction.
    pub fn extracted_files(&self) -> usize {
        self.extracted_files
    }

    /// Entry names refused because they would land outside the root.
    pub fn rejected_entries(&self) -> &[String] {
        &self.rejected_entries
    }

    pub(crate) fn record_file(&mut self) {
        self.extracted_files += 1;
    }

    pub(crate) fn record_rejected(&mut self, name: String) {
        self.rejected_entries.push(name);
    }

    /// Remove the staging directory and everything below it.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| {
            Error::temp_file(
                format!("Failed to remove temporary directory {}", path.display()),
                e,
            )
        })
    }
}
