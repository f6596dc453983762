use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use packfill_utils::error::{ConfigError, PackfillError};
use tracing::debug;

use super::{CliArgs, Config, ConfigSource, Defaults, StoreConfig};

/// Directory searched for upward from the working directory
pub const CONFIG_DIR_NAME: &str = ".packfill";

/// Configuration file name inside the config directory or `$PACKFILL_HOME`
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable naming an explicit state directory
pub const HOME_ENV_VAR: &str = "PACKFILL_HOME";

const ATTRIBUTED_KEYS: &[&str] = &[
    "state_dir",
    "store_path",
    "initial_sizes",
    "max_quantity",
    "verbose",
];

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    defaults: Option<Defaults>,
    store: Option<StoreConfig>,
}

impl Config {
    /// Discover and load configuration with precedence: CLI > file > defaults
    ///
    /// Uses the current working directory and `PACKFILL_HOME`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, PackfillError> {
        let start_dir = env::current_dir().map_err(|e| {
            PackfillError::Config(ConfigError::DiscoveryFailed {
                reason: format!("failed to get current directory: {e}"),
            })
        })?;
        let home = env::var_os(HOME_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::discover_from(&start_dir, home.as_deref(), cli_args)
    }

    /// Discover and load configuration from an explicit starting point.
    ///
    /// This is the path-driven variant used by tests to avoid process-global
    /// state. `home` plays the role of `PACKFILL_HOME`.
    pub fn discover_from(
        start_dir: &Path,
        home: Option<&Path>,
        cli_args: &CliArgs,
    ) -> Result<Self, PackfillError> {
        let mut source_attribution: HashMap<String, ConfigSource> = ATTRIBUTED_KEYS
            .iter()
            .map(|key| ((*key).to_string(), ConfigSource::Default))
            .collect();

        let (config_path, state_dir) = if let Some(explicit) = &cli_args.config_path {
            if !explicit.is_file() {
                return Err(PackfillError::Config(ConfigError::NotFound {
                    path: explicit.display().to_string(),
                }));
            }
            let dir = explicit
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| start_dir.to_path_buf(), Path::to_path_buf);
            (Some(explicit.clone()), dir)
        } else if let Some(home) = home {
            let candidate = home.join(CONFIG_FILE_NAME);
            source_attribution.insert("state_dir".to_string(), ConfigSource::Config);
            (candidate.is_file().then_some(candidate), home.to_path_buf())
        } else {
            match Self::discover_config_file_from(start_dir) {
                Some(path) => {
                    let dir = path
                        .parent()
                        .map_or_else(|| start_dir.join(CONFIG_DIR_NAME), Path::to_path_buf);
                    (Some(path), dir)
                }
                None => (None, start_dir.join(CONFIG_DIR_NAME)),
            }
        };

        let mut defaults = Defaults::default();
        let mut store = StoreConfig::default();

        if let Some(path) = &config_path {
            debug!(path = %path.display(), "Loading configuration file");
            let file_config = Self::load_config_file(path)?;
            let base_dir = path.parent().unwrap_or(start_dir);

            if let Some(file_defaults) = file_config.defaults {
                if file_defaults.verbose.is_some() {
                    defaults.verbose = file_defaults.verbose;
                    source_attribution.insert("verbose".to_string(), ConfigSource::Config);
                }
                if file_defaults.max_quantity.is_some() {
                    defaults.max_quantity = file_defaults.max_quantity;
                    source_attribution.insert("max_quantity".to_string(), ConfigSource::Config);
                }
            }

            if let Some(file_store) = file_config.store {
                if let Some(store_path) = file_store.path {
                    store.path = Some(base_dir.join(store_path));
                    source_attribution.insert("store_path".to_string(), ConfigSource::Config);
                }
                if file_store.initial_sizes.is_some() {
                    store.initial_sizes = file_store.initial_sizes;
                    source_attribution.insert("initial_sizes".to_string(), ConfigSource::Config);
                }
            }
        }

        // CLI overrides everything
        if let Some(store_path) = &cli_args.store_path {
            store.path = Some(store_path.clone());
            source_attribution.insert("store_path".to_string(), ConfigSource::Cli);
        }
        if let Some(max_quantity) = cli_args.max_quantity {
            defaults.max_quantity = Some(max_quantity);
            source_attribution.insert("max_quantity".to_string(), ConfigSource::Cli);
        }
        if let Some(verbose) = cli_args.verbose {
            defaults.verbose = Some(verbose);
            source_attribution.insert("verbose".to_string(), ConfigSource::Cli);
        }

        let config = Config {
            defaults,
            store,
            state_dir,
            config_path,
            source_attribution,
        };
        config.validate()?;
        Ok(config)
    }

    /// Search upward from `start_dir` for `.packfill/config.toml`.
    ///
    /// Stops at the filesystem root or at the first repository root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = start_dir;

        loop {
            let config_path = current_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                return None;
            }

            current_dir = current_dir.parent()?;
        }
    }

    fn load_config_file(path: &Path) -> Result<TomlConfig, PackfillError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PackfillError::Config(ConfigError::InvalidFile(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        })?;
        toml::from_str(&content).map_err(|e| {
            PackfillError::Config(ConfigError::InvalidFile(format!(
                "failed to parse {}: {e}",
                path.display()
            )))
        })
    }
}
