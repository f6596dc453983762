use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use packfill_utils::types::ConfigSource;

/// Largest quantity `calculate` accepts unless configured otherwise
pub const DEFAULT_MAX_QUANTITY: u64 = 10_000_000;

/// Upper bound accepted for `max_quantity`
pub const MAX_QUANTITY_CEILING: u64 = 1_000_000_000;

/// Pack sizes a fresh store starts with
pub const DEFAULT_INITIAL_SIZES: &[u64] = &[250, 500, 1000, 2000, 5000];

/// File name of the pack size store inside the state directory
pub const STORE_FILE_NAME: &str = "pack_sizes.json";

/// `[defaults]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub verbose: Option<bool>,
    pub max_quantity: Option<u64>,
}

/// `[store]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Store file; relative paths resolve against the config file's directory
    pub path: Option<PathBuf>,
    /// Sizes reported until the store file is first written
    pub initial_sizes: Option<Vec<u64>>,
}

/// Configuration for packfill operations.
///
/// Values are resolved with precedence CLI > config file > programmatic >
/// built-in defaults, and each resolved key records where it came from.
///
/// # Discovery
///
/// [`Config::discover()`] reads `$PACKFILL_HOME/config.toml` when
/// `PACKFILL_HOME` is set, otherwise the nearest `.packfill/config.toml`
/// searching upward from the working directory (stopping at a repository
/// root).
///
/// # Configuration File Format
///
/// ```toml
/// [defaults]
/// verbose = false
/// max_quantity = 10000000
///
/// [store]
/// path = "pack_sizes.json"
/// initial_sizes = [250, 500, 1000, 2000, 5000]
/// ```
///
/// # Example
///
/// ```rust
/// use packfill_config::Config;
///
/// let config = Config::builder()
///     .state_dir("/tmp/packfill")
///     .max_quantity(50_000)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_quantity(), 50_000);
/// assert!(config.store_path().ends_with("pack_sizes.json"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub defaults: Defaults,
    pub store: StoreConfig,
    /// Directory holding the config file and, by default, the store
    pub state_dir: PathBuf,
    /// Config file that was loaded, if any
    pub config_path: Option<PathBuf>,
    pub source_attribution: HashMap<String, ConfigSource>,
}

impl Config {
    #[must_use]
    pub fn max_quantity(&self) -> u64 {
        self.defaults.max_quantity.unwrap_or(DEFAULT_MAX_QUANTITY)
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.defaults.verbose.unwrap_or(false)
    }

    /// Resolved store file path
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        match &self.store.path {
            Some(path) => path.clone(),
            None => self.state_dir.join(STORE_FILE_NAME),
        }
    }

    #[must_use]
    pub fn initial_sizes(&self) -> Vec<u64> {
        self.store
            .initial_sizes
            .clone()
            .unwrap_or_else(|| DEFAULT_INITIAL_SIZES.to_vec())
    }

    #[must_use]
    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Where `key` was resolved from
    #[must_use]
    pub fn source_of(&self, key: &str) -> ConfigSource {
        self.source_attribution
            .get(key)
            .copied()
            .unwrap_or(ConfigSource::Default)
    }
}
