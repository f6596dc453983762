//! Pack service: pack sizes from a repository, orders through the optimizer.

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use tracing::{error, info, warn};

use packfill_config::{Config, DEFAULT_MAX_QUANTITY};
use packfill_optimizer::{OptimizerError, calculate_with_cancel, search_limit};
use packfill_store::PackSizeRepository;
use packfill_utils::error::{PackfillError, StoreError};
use packfill_utils::logging::{calculation_span, log_calculation_complete};

use crate::types::FulfilmentReport;

/// Search totals allowed per unit of `max_quantity`
const SEARCH_CEILING_FACTOR: u64 = 3;

/// Search totals always allowed, whatever `max_quantity` is
const MIN_SEARCH_CEILING: u64 = 1_000_000;

/// Limits applied by [`PackService`] before the optimizer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Largest quantity accepted by [`PackService::calculate`]
    pub max_quantity: u64,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            max_quantity: DEFAULT_MAX_QUANTITY,
        }
    }
}

impl ServiceOptions {
    /// Largest total the optimizer may explore.
    ///
    /// The search table holds one slot per total up to the quantity plus
    /// twice the largest pack size, so this bounds memory even when a stored
    /// pack size dwarfs the order.
    #[must_use]
    pub fn search_ceiling(&self) -> u64 {
        self.max_quantity
            .saturating_mul(SEARCH_CEILING_FACTOR)
            .max(MIN_SEARCH_CEILING)
    }
}

impl From<&Config> for ServiceOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_quantity: config.max_quantity(),
        }
    }
}

/// Order fulfilment over a pack size repository.
///
/// ```rust
/// use packfill::service::{PackService, ServiceOptions};
/// use packfill_store::InMemoryPackStore;
///
/// let store = InMemoryPackStore::with_sizes([250, 500, 1000, 2000, 5000]);
/// let service = PackService::new(store, ServiceOptions::default());
///
/// let report = service.calculate(12001).unwrap();
/// assert_eq!(report.fulfilled, 12250);
/// assert_eq!(report.total_packs, 4);
/// ```
#[derive(Debug)]
pub struct PackService<R> {
    repository: R,
    options: ServiceOptions,
}

impl<R: PackSizeRepository> PackService<R> {
    pub fn new(repository: R, options: ServiceOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    #[must_use]
    pub fn options(&self) -> ServiceOptions {
        self.options
    }

    /// Pack sizes currently available, ascending.
    pub fn list_packs(&self) -> Result<Vec<u64>, PackfillError> {
        let sizes = self.repository.pack_sizes().inspect_err(|err| {
            error!(error = %err, "Failed to list pack sizes");
        })?;
        info!(count = sizes.len(), "Pack sizes listed");
        Ok(sizes)
    }

    /// Add a pack size. Returns `false` when it was already present.
    pub fn add_pack(&self, size: u64) -> Result<bool, PackfillError> {
        if size == 0 {
            warn!(size, "Invalid pack size input");
            return Err(StoreError::InvalidPackSize { size }.into());
        }

        let inserted = self.repository.insert_pack_size(size).inspect_err(|err| {
            error!(size, error = %err, "Failed to add pack size");
        })?;
        info!(size, inserted, "Pack size added");
        Ok(inserted)
    }

    /// Remove a pack size.
    pub fn remove_pack(&self, size: u64) -> Result<(), PackfillError> {
        if size == 0 {
            warn!(size, "Invalid size in delete request");
            return Err(StoreError::InvalidPackSize { size }.into());
        }

        self.repository.delete_pack_size(size).inspect_err(|err| {
            error!(size, error = %err, "Failed to delete pack size");
        })?;
        info!(size, "Pack size deleted");
        Ok(())
    }

    /// Fulfil an order of `quantity` units with the current pack sizes.
    pub fn calculate(&self, quantity: u64) -> Result<FulfilmentReport, PackfillError> {
        self.calculate_with_cancel(quantity, &AtomicBool::new(false))
    }

    /// As [`calculate`](Self::calculate), returning
    /// [`OptimizerError::Cancelled`] once `cancel` is set.
    pub fn calculate_with_cancel(
        &self,
        quantity: u64,
        cancel: &AtomicBool,
    ) -> Result<FulfilmentReport, PackfillError> {
        let span = calculation_span(quantity);
        let _guard = span.enter();

        if quantity == 0 {
            warn!(quantity, "Invalid request for pack calculation");
            return Err(OptimizerError::InvalidQuantity { quantity }.into());
        }
        if quantity > self.options.max_quantity {
            warn!(
                quantity,
                max = self.options.max_quantity,
                "Quantity exceeds configured maximum"
            );
            return Err(OptimizerError::QuantityTooLarge {
                quantity,
                max: self.options.max_quantity,
            }
            .into());
        }

        let sizes = self.repository.pack_sizes()?;
        let ceiling = self.options.search_ceiling();
        if search_limit(quantity, &sizes).is_none_or(|limit| limit > ceiling) {
            let largest = sizes.iter().copied().max().unwrap_or(0);
            let max = ceiling
                .saturating_sub(largest.saturating_mul(2))
                .min(self.options.max_quantity);
            warn!(
                quantity,
                largest, ceiling, "Pack search would exceed the search ceiling"
            );
            return Err(OptimizerError::QuantityTooLarge { quantity, max }.into());
        }

        let started = Instant::now();
        let result = calculate_with_cancel(quantity, &sizes, cancel).inspect_err(|err| {
            error!(quantity, error = %err, "Failed to calculate packs");
        })?;

        log_calculation_complete(
            quantity,
            result.total_items(),
            result.total_packs(),
            started.elapsed(),
        );
        Ok(FulfilmentReport::new(quantity, &result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PackEntry;
    use packfill_store::InMemoryPackStore;
    use std::sync::atomic::Ordering;

    fn service() -> PackService<InMemoryPackStore> {
        PackService::new(
            InMemoryPackStore::with_sizes([250, 500, 1000, 2000, 5000]),
            ServiceOptions::default(),
        )
    }

    #[test]
    fn test_calculate_uses_store_sizes() {
        let report = service().calculate(501).unwrap();
        assert_eq!(report.requested, 501);
        assert_eq!(report.fulfilled, 750);
        assert_eq!(report.overpacked, 249);
        assert_eq!(
            report.packs,
            vec![
                PackEntry { size: 500, count: 1 },
                PackEntry { size: 250, count: 1 },
            ]
        );
    }

    #[test]
    fn test_calculate_sees_store_changes() {
        let service = service();
        service.add_pack(1).unwrap();
        let report = service.calculate(251).unwrap();
        assert_eq!(report.fulfilled, 251);
        assert_eq!(report.overpacked, 0);

        service.remove_pack(1).unwrap();
        assert_eq!(service.calculate(251).unwrap().fulfilled, 500);
    }

    #[test]
    fn test_calculate_rejects_zero_quantity() {
        let err = service().calculate(0).unwrap_err();
        assert!(matches!(
            err,
            PackfillError::Optimizer(OptimizerError::InvalidQuantity { quantity: 0 })
        ));
    }

    #[test]
    fn test_calculate_enforces_max_quantity() {
        let service = PackService::new(
            InMemoryPackStore::with_sizes([3]),
            ServiceOptions { max_quantity: 100 },
        );
        assert_eq!(service.calculate(100).unwrap().fulfilled, 102);

        let err = service.calculate(101).unwrap_err();
        assert!(matches!(
            err,
            PackfillError::Optimizer(OptimizerError::QuantityTooLarge {
                quantity: 101,
                max: 100
            })
        ));
    }

    #[test]
    fn test_huge_pack_size_hits_search_ceiling() {
        let service = PackService::new(
            InMemoryPackStore::with_sizes([250, 2_000_000_000]),
            ServiceOptions::default(),
        );
        let err = service.calculate(1).unwrap_err();
        assert!(matches!(
            err,
            PackfillError::Optimizer(OptimizerError::QuantityTooLarge {
                quantity: 1,
                max: 0
            })
        ));

        service.remove_pack(2_000_000_000).unwrap();
        assert_eq!(service.calculate(1).unwrap().fulfilled, 250);
    }

    #[test]
    fn test_search_ceiling_leaves_room_for_large_sizes() {
        let options = ServiceOptions { max_quantity: 100 };
        assert_eq!(options.search_ceiling(), MIN_SEARCH_CEILING);
        assert_eq!(ServiceOptions::default().search_ceiling(), 30_000_000);

        let service = PackService::new(InMemoryPackStore::with_sizes([400_000]), options);
        assert_eq!(service.calculate(100).unwrap().fulfilled, 400_000);

        let service = PackService::new(InMemoryPackStore::with_sizes([600_000]), options);
        assert!(matches!(
            service.calculate(100).unwrap_err(),
            PackfillError::Optimizer(OptimizerError::QuantityTooLarge { quantity: 100, .. })
        ));
    }

    #[test]
    fn test_calculate_with_empty_store() {
        let service = PackService::new(InMemoryPackStore::new(), ServiceOptions::default());
        let err = service.calculate(10).unwrap_err();
        assert!(matches!(
            err,
            PackfillError::Optimizer(OptimizerError::EmptySizeSet)
        ));
    }

    #[test]
    fn test_calculate_cancelled() {
        let cancel = AtomicBool::new(false);
        cancel.store(true, Ordering::Relaxed);
        let err = service().calculate_with_cancel(50_000, &cancel).unwrap_err();
        assert!(matches!(
            err,
            PackfillError::Optimizer(OptimizerError::Cancelled)
        ));
    }

    #[test]
    fn test_add_and_remove_pack() {
        let service = service();
        assert!(service.add_pack(750).unwrap());
        assert!(!service.add_pack(750).unwrap());
        assert_eq!(
            service.list_packs().unwrap(),
            vec![250, 500, 750, 1000, 2000, 5000]
        );

        service.remove_pack(750).unwrap();
        assert!(matches!(
            service.remove_pack(750),
            Err(PackfillError::Store(StoreError::NotFound { size: 750 }))
        ));
        assert!(matches!(
            service.add_pack(0),
            Err(PackfillError::Store(StoreError::InvalidPackSize { size: 0 }))
        ));
    }

    #[test]
    fn test_options_from_config() {
        let config = Config::builder().max_quantity(42).build().unwrap();
        assert_eq!(ServiceOptions::from(&config).max_quantity, 42);

        let service = PackService::new(InMemoryPackStore::new(), ServiceOptions::from(&config));
        assert_eq!(service.options().max_quantity, 42);
        service.add_pack(9).unwrap();
        assert_eq!(service.repository().pack_sizes().unwrap(), vec![9]);
    }
}
