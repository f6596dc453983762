use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use fd_lock::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use packfill_utils::atomic_write::write_file_atomic;
use packfill_utils::canonicalization::emit_jcs;

use crate::{PackSizeRepository, StoreError, ensure_positive};

/// Document format version written by this build
pub const STORE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    sizes: Vec<u64>,
}

/// Lock file guarding mutations of the store at `path`
#[must_use]
pub fn lock_path_for(path: &Utf8Path) -> Utf8PathBuf {
    let mut lock = path.as_str().to_string();
    lock.push_str(".lock");
    Utf8PathBuf::from(lock)
}

/// Pack sizes persisted as a canonical JSON document.
///
/// A missing file reads as the configured initial sizes; the file is only
/// created by the first mutation. Mutations hold an exclusive lock on
/// [`lock_path_for`] across the read-modify-write and replace the document
/// atomically, so concurrent processes never lose each other's updates.
#[derive(Debug, Clone)]
pub struct FilePackStore {
    path: Utf8PathBuf,
    initial_sizes: BTreeSet<u64>,
}

impl FilePackStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            initial_sizes: BTreeSet::new(),
        }
    }

    /// Sizes reported while the store file does not exist yet
    #[must_use]
    pub fn with_initial_sizes(mut self, sizes: impl IntoIterator<Item = u64>) -> Self {
        self.initial_sizes = sizes.into_iter().filter(|&size| size > 0).collect();
        self
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeSet<u64>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path, "Pack size store missing, using initial sizes");
                return Ok(self.initial_sizes.clone());
            }
            Err(err) => return Err(StoreError::Io(err)),
        };

        let document: StoreDocument =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;
        if document.version != STORE_VERSION {
            return Err(self.corrupt(format!(
                "unsupported version {} (expected {STORE_VERSION})",
                document.version
            )));
        }

        let mut sizes = BTreeSet::new();
        for size in document.sizes {
            if size == 0 {
                return Err(self.corrupt("contains a non-positive size".to_string()));
            }
            if !sizes.insert(size) {
                return Err(self.corrupt(format!("contains duplicate size {size}")));
            }
        }
        Ok(sizes)
    }

    fn save(&self, sizes: &BTreeSet<u64>) -> Result<(), StoreError> {
        let document = StoreDocument {
            version: STORE_VERSION,
            sizes: sizes.iter().copied().collect(),
        };
        let mut json = emit_jcs(&document).map_err(|e| self.corrupt(format!("{e:#}")))?;
        json.push('\n');
        write_file_atomic(&self.path, &json).map_err(|source| StoreError::Write {
            path: self.path.to_string(),
            source,
        })?;
        Ok(())
    }

    fn corrupt(&self, reason: String) -> StoreError {
        StoreError::Corrupt {
            path: self.path.to_string(),
            reason,
        }
    }

    /// Run `update` against the current sizes under the store lock, saving
    /// when it reports a change.
    fn update<T>(
        &self,
        update: impl FnOnce(&mut BTreeSet<u64>) -> Result<(T, bool), StoreError>,
    ) -> Result<T, StoreError> {
        let lock_path = lock_path_for(&self.path);
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let lock_file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        let mut lock = RwLock::new(lock_file);
        let _guard = lock.write().map_err(|e| StoreError::Lock {
            path: lock_path.to_string(),
            reason: e.to_string(),
        })?;

        let mut sizes = self.load()?;
        let (value, changed) = update(&mut sizes)?;
        if changed {
            self.save(&sizes)?;
        }
        Ok(value)
    }
}

impl PackSizeRepository for FilePackStore {
    fn pack_sizes(&self) -> Result<Vec<u64>, StoreError> {
        Ok(self.load()?.into_iter().collect())
    }

    fn insert_pack_size(&self, size: u64) -> Result<bool, StoreError> {
        ensure_positive(size)?;
        let inserted = self.update(|sizes| {
            let inserted = sizes.insert(size);
            Ok((inserted, inserted))
        })?;
        if inserted {
            info!(size, path = %self.path, "Pack size added");
        }
        Ok(inserted)
    }

    fn delete_pack_size(&self, size: u64) -> Result<(), StoreError> {
        self.update(|sizes| {
            if sizes.remove(&size) {
                Ok(((), true))
            } else {
                Err(StoreError::NotFound { size })
            }
        })?;
        info!(size, path = %self.path, "Pack size removed");
        Ok(())
    }
}
