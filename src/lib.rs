//! code2prompt library
//!
//! Turns ZIP archives of source code into a single prompt document for a
//! language model: extract into a staging area, discover files, render each
//! one in the selected encoding and aggregate the results.

pub mod archive;
pub mod cache;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod utils;

pub use archive::{extract, Extractor, StagingArea};
pub use cache::{CacheKey, ResultCache};
pub use config::Config;
pub use discovery::{discover, DiscoveredFile};
pub use error::{Error, Result};
pub use format::{format_file_content, render, FileMetadata, FormattingOptions, OutputFormat};
pub use pipeline::{ArchiveJob, BatchPipeline, BatchResult, FileOutcome, FormattedUnit};
