//! Configuration management for code2prompt

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::archive::Extractor;
use crate::cache::ResultCache;
use crate::format::FormattingOptions;
use crate::pipeline::{ArchiveJob, BatchPipeline};

impl Config {
    /// Get the config file path (~/.config/code2prompt/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/code2prompt)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load_from(&io::config_path()?)
    }

    /// Load configuration from an explicit file, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        io::save_to(self, &io::config_path()?)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Build the job for one archive from the configured defaults.
    pub fn job_for(&self, archive: impl Into<PathBuf>) -> ArchiveJob {
        ArchiveJob::new(archive)
            .with_ignore_names(self.discovery.ignore_dirs.iter().cloned())
            .with_extensions(&self.discovery.extensions)
            .with_format(self.output.format)
            .with_options(self.formatting_options())
            .with_metadata(self.output.include_metadata)
    }

    /// Formatting options without per-file metadata.
    pub fn formatting_options(&self) -> FormattingOptions {
        FormattingOptions {
            include_boundaries: self.output.include_boundaries,
            truncate_length: self.output.truncate_length,
            file_metadata: None,
        }
    }

    /// Extractor honoring `processing.staging_dir`.
    pub fn extractor(&self) -> Extractor {
        match &self.processing.staging_dir {
            Some(dir) => Extractor::new().with_staging_parent(dir.clone()),
            None => Extractor::new(),
        }
    }

    /// Pipeline honoring the staging and cache settings.
    pub fn pipeline(&self) -> BatchPipeline {
        let pipeline = BatchPipeline::new().with_extractor(self.extractor());
        if self.cache.enabled {
            pipeline.with_cache(ResultCache::new(self.cache.capacity))
        } else {
            pipeline
        }
    }
}
