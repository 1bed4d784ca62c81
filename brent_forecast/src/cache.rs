//! Load-once cache keyed by file path
//!
//! Input files are treated as static for the lifetime of the process, so
//! entries are never invalidated. Failed loads are not cached.

use crate::error::Result;
use log::debug;
use moka::sync::Cache;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Memoized values produced from files, shared read-only once loaded
pub struct Memoized<T> {
    entries: Cache<PathBuf, Arc<T>>,
}

impl<T: Send + Sync + 'static> Default for Memoized<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> fmt::Debug for Memoized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl<T: Send + Sync + 'static> Memoized<T> {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
        }
    }

    /// Return the cached value for `path`, running `load` on the first request
    pub fn get_or_load<F>(&self, path: &Path, load: F) -> Result<Arc<T>>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        if let Some(value) = self.entries.get(path) {
            debug!("Cache hit for {}", path.display());
            return Ok(value);
        }

        let value = self
            .entries
            .try_get_with(path.to_path_buf(), || load(path).map(Arc::new))?;
        Ok(value)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
