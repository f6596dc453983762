use std::collections::HashMap;
use std::path::PathBuf;

use packfill_utils::error::PackfillError;

use super::{Config, ConfigSource, Defaults, StoreConfig};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// Use this when embedding packfill and the result must not depend on
    /// environment variables or config files.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for programmatic configuration of packfill.
///
/// All values set via the builder are attributed to
/// `ConfigSource::Programmatic`.
///
/// ```rust
/// use packfill_config::{Config, ConfigSource};
///
/// let config = Config::builder()
///     .store_path("/var/lib/packfill/sizes.json")
///     .initial_sizes([23, 31, 53])
///     .build()
///     .unwrap();
/// assert_eq!(config.initial_sizes(), vec![23, 31, 53]);
/// assert_eq!(config.source_of("store_path"), ConfigSource::Programmatic);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    state_dir: Option<PathBuf>,
    store_path: Option<PathBuf>,
    initial_sizes: Option<Vec<u64>>,
    max_quantity: Option<u64>,
    verbose: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new `ConfigBuilder` with no values set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory for packfill state. Default: `./.packfill`
    #[must_use]
    pub fn state_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(path.into());
        self
    }

    /// Store file, overriding `<state_dir>/pack_sizes.json`
    #[must_use]
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Sizes reported before the store file exists
    #[must_use]
    pub fn initial_sizes(mut self, sizes: impl IntoIterator<Item = u64>) -> Self {
        self.initial_sizes = Some(sizes.into_iter().collect());
        self
    }

    /// Largest quantity accepted (1 ..= 1,000,000,000)
    #[must_use]
    pub fn max_quantity(mut self, max: u64) -> Self {
        self.max_quantity = Some(max);
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<Config, PackfillError> {
        let mut source_attribution = HashMap::new();
        let mut mark = |key: &str, set: bool| {
            let source = if set {
                ConfigSource::Programmatic
            } else {
                ConfigSource::Default
            };
            source_attribution.insert(key.to_string(), source);
        };

        mark("state_dir", self.state_dir.is_some());
        mark("store_path", self.store_path.is_some());
        mark("initial_sizes", self.initial_sizes.is_some());
        mark("max_quantity", self.max_quantity.is_some());
        mark("verbose", self.verbose.is_some());

        let config = Config {
            defaults: Defaults {
                verbose: self.verbose,
                max_quantity: self.max_quantity,
            },
            store: StoreConfig {
                path: self.store_path,
                initial_sizes: self.initial_sizes,
            },
            state_dir: self
                .state_dir
                .unwrap_or_else(|| PathBuf::from(super::CONFIG_DIR_NAME)),
            config_path: None,
            source_attribution,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_INITIAL_SIZES, DEFAULT_MAX_QUANTITY};

    #[test]
    fn test_builder_defaults() {
        let config = Config::builder().build().unwrap();
        assert_eq!(config.max_quantity(), DEFAULT_MAX_QUANTITY);
        assert_eq!(config.initial_sizes(), DEFAULT_INITIAL_SIZES.to_vec());
        assert!(!config.verbose());
        assert_eq!(
            config.store_path(),
            PathBuf::from(".packfill").join("pack_sizes.json")
        );
        assert_eq!(config.source_of("max_quantity"), ConfigSource::Default);
    }

    #[test]
    fn test_builder_values_are_programmatic() {
        let config = Config::builder()
            .state_dir("/srv/packfill")
            .max_quantity(1000)
            .verbose(true)
            .build()
            .unwrap();
        assert_eq!(
            config.store_path(),
            PathBuf::from("/srv/packfill").join("pack_sizes.json")
        );
        assert_eq!(config.source_of("max_quantity"), ConfigSource::Programmatic);
        assert_eq!(config.source_of("verbose"), ConfigSource::Programmatic);
        assert!(config.verbose());
    }

    #[test]
    fn test_builder_validates() {
        assert!(Config::builder().max_quantity(0).build().is_err());
        assert!(Config::builder().initial_sizes([250, 0]).build().is_err());
    }
}
