//! Memoization of single-archive pipeline results.
//!
//! Keys combine the SHA-256 digest of the archive bytes with the normalized
//! job options, so an identical archive processed with identical options
//! returns the stored result. Entries are kept in a bounded LRU map behind a
//! single mutex; the lock is only held for lookups and inserts, never while
//! an archive is being processed.

use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};
use crate::format::OutputFormat;
use crate::pipeline::{ArchiveJob, BatchResult};

/// Default number of cached archive results.
pub const DEFAULT_CAPACITY: usize = 32;

/// Everything that influences the output of one archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    archive_digest: String,
    ignore_names: BTreeSet<String>,
    extensions: BTreeSet<String>,
    format: OutputFormat,
    include_boundaries: bool,
    truncate_length: usize,
    include_metadata: bool,
}

impl CacheKey {
    /// Build the key for `job`, hashing the archive contents.
    pub fn for_job(job: &ArchiveJob) -> Result<Self> {
        let options = job.options();
        Ok(Self {
            archive_digest: digest_file(job.archive())?,
            ignore_names: job.ignore_names().clone(),
            extensions: job.extensions().clone(),
            format: job.format(),
            include_boundaries: options.include_boundaries,
            truncate_length: options.truncate_length,
            include_metadata: job.include_metadata(),
        })
    }

    /// Hex SHA-256 of the archive bytes.
    pub fn archive_digest(&self) -> &str {
        &self.archive_digest
    }
}

fn digest_file(path: &std::path::Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| {
        Error::file_processing(format!("Failed to open archive {}", path.display()), e)
    })?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| {
        Error::file_processing(format!("Failed to read archive {}", path.display()), e)
    })?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Thread-safe bounded LRU cache of archive results.
pub struct ResultCache {
    entries: Mutex<LruCache<CacheKey, BatchResult>>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ResultCache {
    /// Create a cache holding at most `capacity` results (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Look up a result, marking it most recently used.
    pub fn get(&self, key: &CacheKey) -> Option<BatchResult> {
        self.lock().get(key).cloned()
    }

    /// Store `value` unless another value is already cached for `key`.
    ///
    /// Returns the value that ends up cached.
    pub fn insert_if_absent(&self, key: CacheKey, value: BatchResult) -> BatchResult {
        let mut entries = self.lock();
        if let Some(existing) = entries.get(&key) {
            return existing.clone();
        }
        entries.put(key, value.clone());
        value
    }

    /// Return the cached result for `key` or compute and store it.
    ///
    /// `compute` runs without the lock held. Errors are returned as-is and
    /// never cached.
    pub fn get_or_try_insert_with<F>(&self, key: CacheKey, compute: F) -> Result<BatchResult>
    where
        F: FnOnce() -> Result<BatchResult>,
    {
        if let Some(hit) = self.get(&key) {
            debug!("Result cache hit for archive {}", key.archive_digest());
            return Ok(hit);
        }
        debug!("Result cache miss for archive {}", key.archive_digest());
        let value = compute()?;
        Ok(self.insert_if_absent(key, value))
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, BatchResult>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
