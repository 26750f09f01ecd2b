//! Test helper utilities

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use code2prompt::{ArchiveJob, BatchPipeline, Extractor};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write a ZIP archive with text entries. Names ending in `/` become directories.
pub fn write_zip(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let raw: Vec<(&str, &[u8])> = entries
        .iter()
        .map(|(entry, contents)| (*entry, contents.as_bytes()))
        .collect();
    write_zip_bytes(dir, name, &raw)
}

/// Write a ZIP archive with arbitrary byte entries.
pub fn write_zip_bytes(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("Failed to create archive");
    let mut writer = ZipWriter::new(file);
    for (entry, contents) in entries {
        if entry.ends_with('/') {
            writer
                .add_directory(*entry, SimpleFileOptions::default())
                .expect("Failed to add directory");
        } else {
            writer
                .start_file(*entry, SimpleFileOptions::default())
                .expect("Failed to start entry");
            writer.write_all(contents).expect("Failed to write entry");
        }
    }
    writer.finish().expect("Failed to finish archive");
    path
}

/// Write bytes that are not a ZIP container under a `.zip` name.
pub fn write_corrupt_zip(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"PK\x03\x04 this is not really an archive").expect("Failed to write");
    path
}

/// `src/app.py` plus a dependency directory that should be excluded.
pub fn project_zip(dir: &Path, name: &str) -> PathBuf {
    write_zip(
        dir,
        name,
        &[
            ("src/", ""),
            ("src/app.py", "print(1)"),
            ("node_modules/x.js", "module.exports = 1;"),
        ],
    )
}

/// Pipeline whose staging areas live under `scratch`.
pub fn pipeline_in(scratch: &Path) -> BatchPipeline {
    BatchPipeline::new().with_extractor(Extractor::new().with_staging_parent(scratch))
}

/// Job excluding only `node_modules`.
pub fn node_modules_job(archive: &Path) -> ArchiveJob {
    ArchiveJob::new(archive).with_ignore_names(["node_modules"])
}

/// Number of entries left in a directory.
pub fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).expect("Failed to read dir").count()
}
