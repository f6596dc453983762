use std::path::PathBuf;

/// Configuration overrides taken from the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit configuration file (skips discovery)
    pub config_path: Option<PathBuf>,
    /// Pack size store file
    pub store_path: Option<PathBuf>,
    /// Largest quantity accepted by `calculate`
    pub max_quantity: Option<u64>,
    pub verbose: Option<bool>,
}
