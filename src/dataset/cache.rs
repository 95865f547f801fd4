use crate::dataset::error::DatasetError;
use crate::types::dataset::Dataset;
use log::{debug, info};
use std::collections::{hash_map::Entry, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

struct CachedDataset {
    modified: SystemTime,
    dataset: Arc<Dataset>,
}

/// Read-through cache of cleaned datasets keyed by canonical source path.
///
/// An entry is served only while the file's modification time matches the one
/// recorded when it was loaded; a newer file replaces the entry.
#[derive(Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, CachedDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset for `path`, or runs `load` and caches its result.
    /// Errors from `load` are returned as-is and never cached.
    pub fn get_or_load<F>(&self, path: &Path, load: F) -> Result<Arc<Dataset>, DatasetError>
    where
        F: FnOnce() -> Result<Dataset, DatasetError>,
    {
        let key = std::fs::canonicalize(path)
            .map_err(|e| DatasetError::SourceMetadata(path.to_path_buf(), e))?;
        let modified = std::fs::metadata(&key)
            .and_then(|metadata| metadata.modified())
            .map_err(|e| DatasetError::SourceMetadata(path.to_path_buf(), e))?;

        {
            let entries = self.lock();
            if let Some(cached) = entries.get(&key) {
                if cached.modified == modified {
                    debug!("Dataset cache hit for {:?}", path);
                    return Ok(cached.dataset.clone());
                }
                info!("Source {:?} changed since it was cached, reloading", path);
            }
        }

        // Parse outside the lock.
        let loaded = Arc::new(load()?);

        let mut entries = self.lock();
        match entries.entry(key) {
            // Someone else stored the same version while we were parsing.
            Entry::Occupied(entry) if entry.get().modified == modified => {
                Ok(entry.get().dataset.clone())
            }
            Entry::Occupied(mut entry) => {
                entry.insert(CachedDataset {
                    modified,
                    dataset: loaded.clone(),
                });
                Ok(loaded)
            }
            Entry::Vacant(entry) => {
                entry.insert(CachedDataset {
                    modified,
                    dataset: loaded.clone(),
                });
                Ok(loaded)
            }
        }
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

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, CachedDataset>> {
        // The map holds no invariant a panicking writer could break.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
