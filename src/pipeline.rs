//! Batch pipeline: extract → discover → read/format → aggregate.
//!
//! Each archive is processed in its own staging area, which is removed on
//! every exit path. Failures are isolated at two levels:
//! - a file that cannot be read as text is skipped and logged
//! - an archive that cannot be extracted, walked or formatted is logged and
//!   contributes nothing, while the remaining archives still run
//!
//! [`BatchPipeline::process`] therefore never fails; everything that went
//! wrong is reported in [`BatchResult::logs`].

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::archive::{Extractor, StagingArea};
use crate::cache::{CacheKey, ResultCache};
use crate::config::DEFAULT_IGNORE_DIRS;
use crate::discovery::{discover, DiscoveredFile};
use crate::error::{Error, Result};
use crate::format::{render, FileMetadata, FormattingOptions, OutputFormat};

/// Leading line of every archive's prompt text.
pub const PROMPT_HEADER: &str =
    "Below is the structured project codebase extracted from the provided ZIP file:\n";

/// Separator placed between the prompt texts of consecutive archives.
pub const ARCHIVE_SEPARATOR: &str = "\n\n";

/// Normalize a user supplied extension to the `".ext"` lower-case form.
///
/// Returns `None` for blank input.
pub fn normalize_extension(ext: &str) -> Option<String> {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}

/// One unit of batch work: an archive plus everything that shapes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveJob {
    archive: PathBuf,
    ignore_names: BTreeSet<String>,
    extensions: BTreeSet<String>,
    format: OutputFormat,
    options: FormattingOptions,
    include_metadata: bool,
}

impl ArchiveJob {
    /// Job with the default ignore list, no extension filter and
    /// Plaintext output with boundaries.
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
            ignore_names: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: BTreeSet::new(),
            format: OutputFormat::default(),
            options: FormattingOptions::default(),
            include_metadata: false,
        }
    }

    /// Replace the set of excluded directory names.
    pub fn with_ignore_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the extension filter; an empty filter includes every file.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Formatting options applied to every file. `file_metadata` is filled
    /// per file by the pipeline, see [`ArchiveJob::with_metadata`].
    pub fn with_options(mut self, options: FormattingOptions) -> Self {
        self.options = FormattingOptions {
            file_metadata: None,
            ..options
        };
        self
    }

    /// Annotate every file with its size on disk.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn archive(&self) -> &Path {
        &self.archive
    }

    pub fn ignore_names(&self) -> &BTreeSet<String> {
        &self.ignore_names
    }

    pub fn extensions(&self) -> &BTreeSet<String> {
        &self.extensions
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }

    pub fn include_metadata(&self) -> bool {
        self.include_metadata
    }
}

/// One successfully rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedUnit {
    pub path: String,
    pub text: String,
}

/// Result of the read step for one discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Included(FormattedUnit),
    Skipped { path: String, reason: String },
}

/// Aggregated output of one or more archives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub prompt: String,
    /// Relative paths of included files, in output order.
    pub file_tree: Vec<String>,
    /// One line per skipped file, rejected entry or failed archive.
    pub logs: Vec<String>,
}

impl BatchResult {
    /// Whether no archive contributed any prompt text.
    pub fn is_empty(&self) -> bool {
        self.prompt.is_empty()
    }

    fn from_outcomes(outcomes: Vec<FileOutcome>, rejected_entries: &[String]) -> Self {
        let mut result = BatchResult {
            prompt: PROMPT_HEADER.to_string(),
            ..BatchResult::default()
        };
        result.logs.extend(
            rejected_entries
                .iter()
                .map(|name| format!("Skipped unsafe archive entry: {name}")),
        );

        for outcome in outcomes {
            match outcome {
                FileOutcome::Included(unit) => {
                    result.prompt.push('\n');
                    result.prompt.push_str(&unit.text);
                    result.file_tree.push(unit.path);
                }
                FileOutcome::Skipped { path, reason } => {
                    result
                        .logs
                        .push(format!("Failed to read file: {path} ({reason})"));
                }
            }
        }
        result
    }
}

/// Drives extraction, discovery and formatting over a batch of archives.
#[derive(Default)]
pub struct BatchPipeline {
    extractor: Extractor,
    cache: Option<ResultCache>,
    cancel: Option<Arc<AtomicBool>>,
}

impl BatchPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Memoize single-archive results in `cache`.
    pub fn with_cache(mut self, cache: ResultCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Stop early once `flag` is set. Staging areas are still removed.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn cache(&self) -> Option<&ResultCache> {
        self.cache.as_ref()
    }

    /// Process archives one after another and merge their results.
    pub fn process(&self, jobs: &[ArchiveJob]) -> BatchResult {
        let results = jobs
            .iter()
            .map(|job| (job, self.process_archive(job)))
            .collect();
        merge(results)
    }

    /// Process archives on the rayon pool; output matches [`process`].
    ///
    /// [`process`]: BatchPipeline::process
    pub fn process_parallel(&self, jobs: &[ArchiveJob]) -> BatchResult {
        let results = jobs
            .par_iter()
            .map(|job| (job, self.process_archive(job)))
            .collect();
        merge(results)
    }

    /// Process a single archive, consulting the cache when one is attached.
    pub fn process_archive(&self, job: &ArchiveJob) -> Result<BatchResult> {
        self.check_cancelled(job)?;
        match &self.cache {
            Some(cache) => {
                let key = CacheKey::for_job(job)?;
                cache.get_or_try_insert_with(key, || self.run_archive(job))
            }
            None => self.run_archive(job),
        }
    }

    fn run_archive(&self, job: &ArchiveJob) -> Result<BatchResult> {
        let staging = self.extractor.extract(job.archive())?;
        let rejected = staging.rejected_entries().to_vec();
        let outcomes = self.read_files(&staging, job);
        let cleanup = staging.close();

        let outcomes = match outcomes {
            Ok(outcomes) => outcomes,
            Err(e) => {
                if let Err(cleanup_err) = cleanup {
                    warn!("{cleanup_err}");
                }
                return Err(e);
            }
        };

        let mut result = BatchResult::from_outcomes(outcomes, &rejected);
        if let Err(cleanup_err) = cleanup {
            warn!("{cleanup_err}");
            result.logs.push(cleanup_err.to_string());
        }
        info!(
            "Processed {}: {} files included, {} log entries",
            job.archive().display(),
            result.file_tree.len(),
            result.logs.len()
        );
        Ok(result)
    }

    fn read_files(&self, staging: &StagingArea, job: &ArchiveJob) -> Result<Vec<FileOutcome>> {
        let files = discover(staging.path(), job.ignore_names(), job.extensions())?;
        let mut outcomes = Vec::with_capacity(files.len());
        for file in &files {
            self.check_cancelled(job)?;
            outcomes.push(format_file(file, job)?);
        }
        Ok(outcomes)
    }

    fn check_cancelled(&self, job: &ArchiveJob) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(Error::Cancelled {
                archive: job.archive().to_path_buf(),
            }),
            _ => Ok(()),
        }
    }
}

/// Read and render one file. Unreadable files become `Skipped`; a
/// formatting failure is an error for the whole archive.
fn format_file(file: &DiscoveredFile, job: &ArchiveJob) -> Result<FileOutcome> {
    let content = match read_text(&file.absolute) {
        Ok(content) => content,
        Err(reason) => {
            debug!("Skipping {}: {reason}", file.relative);
            return Ok(FileOutcome::Skipped {
                path: file.relative.clone(),
                reason,
            });
        }
    };

    let options = FormattingOptions {
        file_metadata: if job.include_metadata() {
            fs::metadata(&file.absolute)
                .ok()
                .map(|m| FileMetadata { size: m.len() })
        } else {
            None
        },
        ..*job.options()
    };
    let text = render(&file.relative, &content, job.format(), &options)?;
    Ok(FileOutcome::Included(FormattedUnit {
        path: file.relative.clone(),
        text,
    }))
}

/// Read a file as UTF-8 text with `\n` line endings.
fn read_text(path: &Path) -> std::result::Result<String, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    let text = String::from_utf8(bytes)
        .map_err(|e| format!("not valid UTF-8 text: {}", e.utf8_error()))?;
    Ok(normalize_newlines(text))
}

fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

fn merge(results: Vec<(&ArchiveJob, Result<BatchResult>)>) -> BatchResult {
    let mut combined = BatchResult::default();
    let mut prompts = Vec::new();

    for (job, result) in results {
        match result {
            Ok(result) => {
                prompts.push(result.prompt);
                combined.file_tree.extend(result.file_tree);
                combined.logs.extend(result.logs);
            }
            Err(e @ Error::Cancelled { .. }) => {
                info!("{e}");
                combined.logs.push(e.to_string());
            }
            Err(e) => {
                let line = format!("Failed to process {}: {e}", job.archive().display());
                info!("{line}");
                combined.logs.push(line);
            }
        }
    }

    combined.prompt = prompts.join(ARCHIVE_SEPARATOR);
    combined
}
