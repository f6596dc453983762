use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use crate::{PackSizeRepository, StoreError, ensure_positive};

/// Pack sizes held in process memory
#[derive(Debug, Default)]
pub struct InMemoryPackStore {
    sizes: Mutex<BTreeSet<u64>>,
}

impl InMemoryPackStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store; zero sizes and repeats are dropped.
    #[must_use]
    pub fn with_sizes(sizes: impl IntoIterator<Item = u64>) -> Self {
        Self {
            sizes: Mutex::new(sizes.into_iter().filter(|&size| size > 0).collect()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<u64>> {
        // The set is always left consistent, so a poisoned lock is still usable
        self.sizes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PackSizeRepository for InMemoryPackStore {
    fn pack_sizes(&self) -> Result<Vec<u64>, StoreError> {
        Ok(self.lock().iter().copied().collect())
    }

    fn insert_pack_size(&self, size: u64) -> Result<bool, StoreError> {
        ensure_positive(size)?;
        Ok(self.lock().insert(size))
    }

    fn delete_pack_size(&self, size: u64) -> Result<(), StoreError> {
        if self.lock().remove(&size) {
            Ok(())
        } else {
            Err(StoreError::NotFound { size })
        }
    }
}
