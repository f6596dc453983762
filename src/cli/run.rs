//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Builds CliArgs and discovers Config
//! - Initialises logging
//! - Dispatches to command handlers
//! - Handles all error output

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::debug;

use super::args::{Cli, Commands};
use super::commands;

use crate::service::{PackService, ServiceOptions};
use crate::{CliArgs, Config, ExitCode, PackfillError};
use packfill_store::FilePackStore;
use packfill_utils::error::ConfigError;
use packfill_utils::logging::init_tracing;

/// Main CLI execution function.
///
/// This function handles ALL output including errors. It returns `Result<(), ExitCode>`:
/// - On success: returns `Ok(())` after printing any output
/// - On error: prints the user-facing report to stderr, returns `Err(ExitCode)`
///
/// main.rs only calls `std::process::exit(code.as_i32())` on error - it does NOT print.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    let cli_args = CliArgs {
        config_path: cli.config.clone(),
        store_path: cli.store.clone(),
        max_quantity: cli.max_quantity,
        // An absent flag must not override `verbose = true` from the file
        verbose: cli.verbose.then_some(true),
    };

    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            eprint!("{}", err.display_for_user());
            return Err(err.to_exit_code());
        }
    };

    if let Err(e) = init_tracing(config.verbose()) {
        eprintln!("Warning: failed to initialise logging: {e}");
    }
    debug!(
        config_path = ?config.config_path,
        store_path = %config.store_path().display(),
        "Configuration loaded"
    );

    if let Err(error) = dispatch(&cli, &config) {
        if let Some(packfill_error) = error.downcast_ref::<PackfillError>() {
            eprint!("{}", packfill_error.display_for_user());
            return Err(packfill_error.to_exit_code());
        }

        eprintln!("Error: {error:#}");
        eprintln!("\n  General troubleshooting:");
        eprintln!("    - Run with --verbose for more detailed output");
        eprintln!("    - Check that the store directory is writable");
        return Err(ExitCode::INTERNAL);
    }

    Ok(())
}

fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Calculate { quantity } => {
            let service = open_service(config)?;
            commands::execute_calculate_command(&service, *quantity, cli.json)
        }
        Commands::Sizes(sizes_cmd) => {
            let service = open_service(config)?;
            commands::execute_sizes_command(&service, sizes_cmd, cli.json)
        }
        Commands::Config => commands::execute_config_command(config, cli.json),
    }
}

/// Build the pack service over the configured file store.
fn open_service(config: &Config) -> Result<PackService<FilePackStore>, PackfillError> {
    let store_path = config.store_path();
    let store_path = Utf8PathBuf::try_from(store_path).map_err(|e| {
        PackfillError::Config(ConfigError::InvalidValue {
            key: "store_path".to_string(),
            value: format!("{} is not valid UTF-8", e.into_path_buf().display()),
        })
    })?;

    let store = FilePackStore::new(store_path).with_initial_sizes(config.initial_sizes());
    Ok(PackService::new(store, ServiceOptions::from(config)))
}
