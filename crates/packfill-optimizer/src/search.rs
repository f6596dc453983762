//! Bounded shortest-combination search
//!
//! Every total from `0` to `quantity + 2 * max_size` gets one table slot
//! holding the fewest packs known to reach it and the size of the last pack
//! added. Totals are swept in ascending order and relaxed forward; since
//! adding a pack only ever increases the total, each slot is final by the
//! time the sweep reaches it. The answer is the first reached slot at or
//! above `quantity`, rebuilt by walking the back-pointers to zero.
//!
//! Ties on `(total_items, total_packs)` are broken by iteration order: sizes
//! are visited ascending and the first allocation to reach a slot keeps it.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, warn};

use crate::error::OptimizerError;
use crate::result::{Allocation, PackResult};

/// Number of totals swept between checks of the cancellation flag
pub const CANCEL_POLL_INTERVAL: usize = 4096;

/// Largest table index the search will allocate.
///
/// Pack counts are stored as `u32`; with every size at least one unit, no
/// count can exceed its total, so bounding the total bounds the count.
const MAX_SEARCH_LIMIT: u64 = (u32::MAX - 1) as u64;

#[derive(Debug, Clone, Copy)]
struct Reach {
    packs: u32,
    size_index: u32,
}

impl Reach {
    const UNREACHED: Self = Self {
        packs: u32::MAX,
        size_index: u32::MAX,
    };

    const ORIGIN: Self = Self {
        packs: 0,
        size_index: u32::MAX,
    };

    fn is_reached(self) -> bool {
        self.packs != u32::MAX
    }
}

/// Find the minimal-overage, minimal-pack-count allocation for `quantity`.
///
/// Zero and repeated sizes are ignored and the remaining sizes are searched in
/// ascending order, so the result does not depend on the order of `sizes`.
///
/// # Errors
///
/// - [`OptimizerError::InvalidQuantity`] when `quantity` is zero
/// - [`OptimizerError::EmptySizeSet`] when `sizes` is empty
/// - [`OptimizerError::QuantityTooLarge`] when the search table would not fit
/// - [`OptimizerError::SearchExhausted`] when no positive size was given
pub fn calculate(quantity: u64, sizes: &[u64]) -> Result<PackResult, OptimizerError> {
    search(quantity, sizes, None)
}

/// Same as [`calculate`], stopping with [`OptimizerError::Cancelled`] once
/// `cancel` is set.
///
/// The flag is polled every [`CANCEL_POLL_INTERVAL`] totals.
pub fn calculate_with_cancel(
    quantity: u64,
    sizes: &[u64],
    cancel: &AtomicBool,
) -> Result<PackResult, OptimizerError> {
    search(quantity, sizes, Some(cancel))
}

/// Upper bound of the totals explored for `quantity`: `quantity + 2 * max_size`.
///
/// Returns `None` on overflow.
#[must_use]
pub fn search_limit(quantity: u64, sizes: &[u64]) -> Option<u64> {
    let max_size = sizes.iter().copied().max().unwrap_or(0);
    max_size
        .checked_mul(2)
        .and_then(|span| quantity.checked_add(span))
}

fn search(
    quantity: u64,
    sizes: &[u64],
    cancel: Option<&AtomicBool>,
) -> Result<PackResult, OptimizerError> {
    if quantity == 0 {
        warn!(quantity, "Rejected pack calculation for non-positive quantity");
        return Err(OptimizerError::InvalidQuantity { quantity });
    }
    if sizes.is_empty() {
        return Err(OptimizerError::EmptySizeSet);
    }

    let sizes = normalize_sizes(sizes);
    if sizes.is_empty() {
        error!(quantity, "No positive pack size to search with");
        return Err(OptimizerError::SearchExhausted {
            quantity,
            limit: quantity,
        });
    }

    let too_large = || OptimizerError::QuantityTooLarge {
        quantity,
        max: max_quantity_for(&sizes),
    };

    let limit = search_limit(quantity, &sizes)
        .filter(|&limit| limit <= MAX_SEARCH_LIMIT)
        .ok_or_else(too_large)?;
    let len = usize::try_from(limit)
        .ok()
        .and_then(|limit| limit.checked_add(1))
        .ok_or_else(too_large)?;

    debug!(quantity, limit, sizes = sizes.len(), "Building pack search table");
    let mut table = Vec::new();
    table.try_reserve_exact(len).map_err(|err| {
        error!(quantity, len, error = %err, "Failed to allocate pack search table");
        too_large()
    })?;
    table.resize(len, Reach::UNREACHED);
    fill_table(&mut table, &sizes, || {
        cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    })?;

    // quantity <= limit < len, so the conversion cannot fail here
    let start = usize::try_from(quantity).map_err(|_| too_large())?;
    let Some(total) = (start..len).find(|&total| table[total].is_reached()) else {
        error!(quantity, limit, "Pack search exhausted without a reachable total");
        return Err(OptimizerError::SearchExhausted { quantity, limit });
    };

    Ok(PackResult::from_allocation(reconstruct(&table, &sizes, total)))
}

/// Drop non-positive and repeated sizes, sorted ascending
fn normalize_sizes(sizes: &[u64]) -> Vec<u64> {
    let mut sizes: Vec<u64> = sizes.iter().copied().filter(|&size| size > 0).collect();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

fn max_quantity_for(sizes: &[u64]) -> u64 {
    let span = sizes.last().copied().unwrap_or(0).saturating_mul(2);
    MAX_SEARCH_LIMIT.saturating_sub(span)
}

/// Sweep every slot of `table`, polling `is_cancelled` every
/// [`CANCEL_POLL_INTERVAL`] totals.
fn fill_table(
    table: &mut [Reach],
    sizes: &[u64],
    is_cancelled: impl Fn() -> bool,
) -> Result<(), OptimizerError> {
    let len = table.len();
    if len == 0 {
        return Ok(());
    }
    table[0] = Reach::ORIGIN;

    for total in 0..len {
        if total % CANCEL_POLL_INTERVAL == 0 && is_cancelled() {
            debug!(total, "Pack search cancelled");
            return Err(OptimizerError::Cancelled);
        }

        let current = table[total];
        if !current.is_reached() {
            continue;
        }
        let packs = current.packs + 1;

        for (index, &size) in sizes.iter().enumerate() {
            let next = match usize::try_from(size).ok().and_then(|s| total.checked_add(s)) {
                Some(next) if next < len => next,
                // sizes are ascending, so every later size overshoots too
                _ => break,
            };
            let slot = &mut table[next];
            if !slot.is_reached() || packs < slot.packs {
                // index < sizes.len() <= max_size <= MAX_SEARCH_LIMIT
                *slot = Reach {
                    packs,
                    size_index: index as u32,
                };
            }
        }
    }

    Ok(())
}

fn reconstruct(table: &[Reach], sizes: &[u64], total: usize) -> Allocation {
    let mut allocation = Allocation::new();
    let mut cursor = total;
    while cursor > 0 {
        let size = sizes[table[cursor].size_index as usize];
        *allocation.entry(size).or_insert(0) += 1;
        // size was used to step from cursor - size, so it fits in usize
        cursor -= size as usize;
    }
    allocation
}
