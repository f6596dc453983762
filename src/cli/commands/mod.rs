//! CLI command implementations.
//!
//! Handlers return `anyhow::Result`; library errors travel inside as
//! [`PackfillError`](crate::PackfillError) so `run()` can map them to exit codes.

mod calculate;
mod config;
mod json_emit;
mod sizes;

pub use calculate::execute_calculate_command;
pub use config::execute_config_command;
pub use sizes::execute_sizes_command;
