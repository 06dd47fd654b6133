//! Process-wide memo of the last loaded dataset.
//!
//! Keyed by [`SourceIdentity`]; at most one load runs per identity at a time and
//! concurrent callers share its result.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use tracing::{debug, info};

use crate::domain::entities::dataset::Dataset;
use crate::domain::error::DataLoadError;

/// Source path plus the file metadata that changes when its content does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceIdentity {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceIdentity {
    pub fn of(path: &Path) -> Result<Self, DataLoadError> {
        let metadata = std::fs::metadata(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

type Slot = Arc<Mutex<Option<Arc<Dataset>>>>;

#[derive(Default)]
pub struct DatasetCache {
    slots: Mutex<HashMap<SourceIdentity, Slot>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset for `identity`, running `load` if there is none.
    ///
    /// The slot lock is held while `load` runs, so concurrent first calls for the same
    /// identity wait and then share one result. A failed load leaves the slot empty.
    pub fn get_or_load<F>(
        &self,
        identity: &SourceIdentity,
        load: F,
    ) -> Result<Arc<Dataset>, DataLoadError>
    where
        F: FnOnce() -> Result<Dataset, DataLoadError>,
    {
        let slot = {
            let mut slots = self.lock_slots();
            Arc::clone(slots.entry(identity.clone()).or_default())
        };

        let mut guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(dataset) = guard.as_ref() {
            debug!(path = %identity.path.display(), "dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load()?);
        info!(
            path = %identity.path.display(),
            records = dataset.len(),
            "dataset loaded"
        );
        *guard = Some(Arc::clone(&dataset));
        drop(guard);

        // a fresh load retires every other identity, except slots a caller still holds
        self.lock_slots()
            .retain(|key, slot| key == identity || Arc::strong_count(slot) > 1);
        Ok(dataset)
    }

    pub fn get(&self, identity: &SourceIdentity) -> Option<Arc<Dataset>> {
        let slot = self.lock_slots().get(identity).cloned()?;
        let guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }

    pub fn invalidate(&self) {
        self.lock_slots().clear();
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<SourceIdentity, Slot>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
