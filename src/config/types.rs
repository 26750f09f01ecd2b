//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cache::DEFAULT_CAPACITY;
use crate::format::OutputFormat;

/// Directory names excluded from discovery unless configured otherwise.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    "node_modules",
    ".next",
    ".bolt",
    ".git",
    "dist",
    "build",
    "tmp",
    "coverage",
    "venv",
    ".cache",
    "logs",
    "out",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Which files are picked up from an extracted archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Directory names pruned at any depth
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
    /// Extension filter (".py" or "py"); empty means every file
    #[serde(default)]
    pub extensions: Vec<String>,
}

pub fn default_ignore_dirs() -> Vec<String> {
    DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: default_ignore_dirs(),
            extensions: Vec::new(),
        }
    }
}

/// How each file is rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_include_boundaries")]
    pub include_boundaries: bool,
    /// Maximum characters per file, 0 disables truncation
    #[serde(default)]
    pub truncate_length: usize,
    #[serde(default)]
    pub include_metadata: bool,
}

pub fn default_include_boundaries() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_boundaries: default_include_boundaries(),
            truncate_length: 0,
            include_metadata: false,
        }
    }
}

/// Batch execution settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Process archives concurrently
    #[serde(default)]
    pub parallel: bool,
    /// Parent directory for staging areas (system temp dir when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<PathBuf>,
}

/// Result cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

pub fn default_cache_enabled() -> bool {
    true
}

pub fn default_cache_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            capacity: default_cache_capacity(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns `Ok(())` if all values are within acceptable bounds,
    /// or an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if self.cache.enabled && self.cache.capacity == 0 {
            return Err("cache.capacity must be > 0 when the cache is enabled".to_string());
        }
        if self
            .discovery
            .ignore_dirs
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err("discovery.ignore_dirs must not contain empty names".to_string());
        }
        Ok(())
    }
}
