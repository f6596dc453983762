//! Storage for the set of allowed pack sizes
//!
//! The pack calculation only needs the current list of sizes; this crate
//! owns where that list lives. [`PackSizeRepository`] is the seam the
//! service layer depends on, with an in-memory implementation for tests and
//! embedding and a file-backed one for the CLI.

mod file;
mod memory;

pub use file::{FilePackStore, STORE_VERSION, lock_path_for};
pub use memory::InMemoryPackStore;
pub use packfill_utils::error::StoreError;

/// Source of truth for the allowed pack sizes.
///
/// Implementations hold distinct positive sizes and are safe to share
/// between threads.
pub trait PackSizeRepository: Send + Sync {
    /// All sizes, ascending
    fn pack_sizes(&self) -> Result<Vec<u64>, StoreError>;

    /// Add `size`. Adding an existing size is a no-op and returns `false`.
    ///
    /// Fails with [`StoreError::InvalidPackSize`] for zero.
    fn insert_pack_size(&self, size: u64) -> Result<bool, StoreError>;

    /// Remove `size`, failing with [`StoreError::NotFound`] if it is absent.
    fn delete_pack_size(&self, size: u64) -> Result<(), StoreError>;
}

fn ensure_positive(size: u64) -> Result<(), StoreError> {
    if size == 0 {
        return Err(StoreError::InvalidPackSize { size });
    }
    Ok(())
}
