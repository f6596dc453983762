//! Configuration for packfill
//!
//! Hierarchical configuration with discovery and precedence:
//! CLI > file > defaults. Configuration files are TOML with optional
//! `[defaults]` and `[store]` sections.

mod config;

pub use config::*;
pub use packfill_utils::error::{ConfigError, PackfillError};
