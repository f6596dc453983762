use std::collections::BTreeSet;

use packfill_utils::error::{ConfigError, PackfillError};

use super::{Config, MAX_QUANTITY_CEILING};

impl Config {
    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), PackfillError> {
        if let Some(max_quantity) = self.defaults.max_quantity {
            if max_quantity == 0 {
                return Err(invalid("max_quantity", "must be greater than 0"));
            }
            if max_quantity > MAX_QUANTITY_CEILING {
                return Err(invalid(
                    "max_quantity",
                    "exceeds maximum limit of 1000000000",
                ));
            }
        }

        if let Some(sizes) = &self.store.initial_sizes {
            if sizes.contains(&0) {
                return Err(invalid("initial_sizes", "pack sizes must be positive"));
            }
            let distinct: BTreeSet<_> = sizes.iter().collect();
            if distinct.len() != sizes.len() {
                return Err(invalid("initial_sizes", "pack sizes must be distinct"));
            }
        }

        if let Some(path) = &self.store.path {
            if path.as_os_str().is_empty() {
                return Err(invalid("store_path", "must not be empty"));
            }
            if path.to_str().is_none() {
                return Err(invalid("store_path", "must be valid UTF-8"));
            }
        }

        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> PackfillError {
    PackfillError::Config(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
