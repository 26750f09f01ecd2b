//! Archive extraction into an isolated staging area.
//!
//! # Module Structure
//!
//! - [`staging`] - RAII owner of the staging directory
//! - [`sanitize`] - entry name normalization (zip-slip prevention)
//!
//! Extraction either returns a fully populated [`StagingArea`] or an error;
//! on the error path the partially written directory is removed before the
//! error reaches the caller.

pub mod sanitize;
pub mod staging;

pub use sanitize::{entry_path, EntryPath};
pub use staging::{StagingArea, STAGING_PREFIX};

use std::fs::{self, File};
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Extract `archive_path` into a staging area under the OS temp directory.
pub fn extract(archive_path: &Path) -> Result<StagingArea> {
    Extractor::new().extract(archive_path)
}

/// ZIP extractor with a configurable staging location.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    staging_parent: Option<PathBuf>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create staging directories below `parent` instead of the OS temp dir.
    pub fn with_staging_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.staging_parent = Some(parent.into());
        self
    }

    /// Extract one archive into a fresh staging area.
    ///
    /// Fails with [`Error::FileProcessing`] when the archive is missing or not
    /// a readable ZIP container, and with [`Error::TempFile`] when the staging
    /// directory cannot be created or written.
    pub fn extract(&self, archive_path: &Path) -> Result<StagingArea> {
        debug!("Extracting archive {}", archive_path.display());

        let file = File::open(archive_path).map_err(|e| {
            Error::file_processing(
                format!("Failed to open archive {}", archive_path.display()),
                e,
            )
        })?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| Error::file_processing("Invalid or corrupted ZIP file", e))?;

        let mut staging = StagingArea::create(self.staging_parent.as_deref())?;
        // On error `staging` is dropped here, which removes the directory.
        unpack(&mut archive, &mut staging)?;

        info!(
            "Extracted {} files from {} into {}",
            staging.extracted_files(),
            archive_path.display(),
            staging.path().display()
        );
        Ok(staging)
    }
}

fn unpack<R: Read + Seek>(archive: &mut ZipArchive<R>, staging: &mut StagingArea) -> Result<()> {
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| {
            Error::file_processing(format!("Failed to read archive entry #{index}"), e)
        })?;
        let name = entry.name().to_string();

        let relative = match entry_path(&name) {
            EntryPath::Safe(relative) => relative,
            EntryPath::Root => continue,
            EntryPath::Unsafe => {
                warn!("Rejected archive entry outside the staging root: {name}");
                staging.record_rejected(name);
                continue;
            }
        };
        let target = staging.path().join(relative);

        if entry.is_dir() {
            create_dir(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            create_dir(parent)?;
        }

        let write_failed = |e: io::Error| {
            Error::temp_file(
                format!("Failed to extract {name} to temporary directory"),
                e,
            )
        };
        let mut out = File::create(&target).map_err(write_failed)?;
        copy_entry(&mut entry, &mut out).map_err(|e| match e {
            CopyError::Read(e) => Error::file_processing(format!("Corrupted archive entry {name}"), e),
            CopyError::Write(e) => write_failed(e),
        })?;
        staging.record_file();
    }
    Ok(())
}

enum CopyError {
    Read(io::Error),
    Write(io::Error),
}

/// Stream one entry to disk. `io::copy` would hide which side failed.
fn copy_entry(
    reader: &mut impl Read,
    writer: &mut impl Write,
) -> std::result::Result<(), CopyError> {
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };
        writer.write_all(&buf[..n]).map_err(CopyError::Write)?;
    }
    writer.flush().map_err(CopyError::Write)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        Error::temp_file(
            format!("Failed to create directory {}", path.display()),
            e,
        )
    })
}
