//! Result types for the pack search

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count of packs used per pack size, ordered by size ascending.
///
/// Sizes with a zero count are never present.
pub type Allocation = BTreeMap<u64, u64>;

/// Outcome of a single pack calculation.
///
/// Built fresh by each call to [`calculate`](crate::calculate) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackResult {
    total_items: u64,
    total_packs: u64,
    allocation: Allocation,
}

impl PackResult {
    /// Build a result from an allocation, deriving both totals from it.
    #[must_use]
    pub fn from_allocation(allocation: Allocation) -> Self {
        let allocation: Allocation = allocation
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .collect();
        let total_items = allocation.iter().map(|(size, count)| size * count).sum();
        let total_packs = allocation.values().sum();
        Self {
            total_items,
            total_packs,
            allocation,
        }
    }

    /// Units actually shipped
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Packs used across all sizes
    #[must_use]
    pub fn total_packs(&self) -> u64 {
        self.total_packs
    }

    #[must_use]
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Number of packs of `size` used, zero when the size is unused
    #[must_use]
    pub fn count_for(&self, size: u64) -> u64 {
        self.allocation.get(&size).copied().unwrap_or(0)
    }

    /// Units shipped beyond `requested`
    #[must_use]
    pub fn overage(&self, requested: u64) -> u64 {
        self.total_items.saturating_sub(requested)
    }

    /// Consume the result, returning its allocation
    #[must_use]
    pub fn into_allocation(self) -> Allocation {
        self.allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_follow_allocation() {
        let result = PackResult::from_allocation(BTreeMap::from([(250, 1), (2000, 1), (5000, 2)]));
        assert_eq!(result.total_items(), 12_250);
        assert_eq!(result.total_packs(), 4);
        assert_eq!(result.overage(12_001), 249);
    }

    #[test]
    fn zero_counts_are_dropped() {
        let result = PackResult::from_allocation(BTreeMap::from([(250, 0), (500, 2)]));
        assert_eq!(result.allocation().len(), 1);
        assert_eq!(result.count_for(250), 0);
        assert_eq!(result.total_items(), 1000);
    }

    #[test]
    fn into_allocation_keeps_counts() {
        let result = PackResult::from_allocation(BTreeMap::from([(250, 1), (500, 0), (5000, 2)]));
        assert_eq!(
            result.into_allocation(),
            BTreeMap::from([(250, 1), (5000, 2)])
        );
    }

    #[test]
    fn overage_never_underflows() {
        let result = PackResult::from_allocation(BTreeMap::from([(250, 1)]));
        assert_eq!(result.overage(400), 0);
    }
}
