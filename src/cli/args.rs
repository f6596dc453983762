//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface structure using clap,
//! including the main `Cli` struct and all subcommand enums.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// packfill - fulfil orders with the fewest leftover units and packs
#[derive(Parser, Debug)]
#[command(name = "packfill")]
#[command(about = "Choose pack counts that fulfil an order with the least overpacking")]
#[command(long_about = r#"
packfill chooses how many containers of each allowed pack size to ship so an
order is covered with the fewest leftover units and, among ties, the fewest
containers.

EXAMPLES:
  # Fulfil an order of 12001 units
  packfill calculate 12001

  # Same, as canonical JSON
  packfill calculate 12001 --json

  # Manage the allowed pack sizes
  packfill sizes list
  packfill sizes add 750
  packfill sizes remove 750

  # Show the effective configuration and where each value came from
  packfill config

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults
  Config file is $PACKFILL_HOME/config.toml when PACKFILL_HOME is set, otherwise
  discovered by searching upward from CWD for .packfill/config.toml
  Use --config to specify an explicit config file path
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pack size store file (default: <state dir>/pack_sizes.json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Largest quantity accepted by calculate (default: 10000000)
    #[arg(long, global = true)]
    pub max_quantity: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit canonical JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fulfil an order of QUANTITY units
    ///
    /// EXAMPLES:
    ///   packfill calculate 251
    ///   packfill calculate 12001 --json
    Calculate {
        /// Number of units ordered (positive integer)
        quantity: u64,
    },

    /// Manage the allowed pack sizes
    #[command(subcommand)]
    Sizes(SizesCommands),

    /// Show effective configuration with value sources
    Config,
}

/// Pack size management subcommands
#[derive(Subcommand, Debug)]
pub enum SizesCommands {
    /// List pack sizes, ascending
    List,

    /// Add a pack size (no-op when already present)
    Add {
        /// Pack size in units (positive integer)
        size: u64,
    },

    /// Remove a pack size
    Remove {
        /// Pack size in units
        size: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "packfill",
            "calculate",
            "251",
            "--json",
            "--store",
            "sizes.json",
            "--max-quantity",
            "1000",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.store, Some(PathBuf::from("sizes.json")));
        assert_eq!(cli.max_quantity, Some(1000));
        assert!(matches!(cli.command, Commands::Calculate { quantity: 251 }));
    }

    #[test]
    fn test_sizes_subcommands() {
        let cli = Cli::try_parse_from(["packfill", "sizes", "add", "750"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Sizes(SizesCommands::Add { size: 750 })
        ));

        let cli = Cli::try_parse_from(["packfill", "sizes", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::Sizes(SizesCommands::List)));
    }

    #[test]
    fn test_negative_quantity_rejected_by_parser() {
        assert!(Cli::try_parse_from(["packfill", "calculate", "-5"]).is_err());
        assert!(Cli::try_parse_from(["packfill", "calculate", "2.5"]).is_err());
    }
}
