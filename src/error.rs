//! Error family shared by every stage of the prompt pipeline.
//!
//! Three kinds of failure matter to callers:
//! - `FileProcessing` - the archive or a directory could not be read
//! - `TempFile` - a staging directory could not be created, written or removed
//! - `Format` - a file could not be rendered into the requested output format
//!
//! Callers can match a single variant or treat the enum as a whole.

use std::io;
use std::path::PathBuf;

/// Errors produced by extraction, discovery, formatting and batch processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Archive missing, not a valid container, corrupted, or a directory
    /// that could not be read.
    #[error("{context}: {detail}")]
    FileProcessing { context: String, detail: String },

    /// Staging directory could not be created, populated or removed.
    #[error("{context}: {source}")]
    TempFile {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Invalid format name, invalid formatter input, or a rendering failure.
    #[error("Failed to format content for {path}: {reason}")]
    Format { path: String, reason: String },

    /// Processing was interrupted before the archive finished.
    #[error("Cancelled while processing {archive}")]
    Cancelled { archive: PathBuf },
}

impl Error {
    pub(crate) fn file_processing(context: impl Into<String>, detail: impl ToString) -> Self {
        Error::FileProcessing {
            context: context.into(),
            detail: detail.to_string(),
        }
    }

    pub(crate) fn temp_file(context: impl Into<String>, source: io::Error) -> Self {
        Error::TempFile {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<String>, reason: impl ToString) -> Self {
        Error::Format {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
