//! packfill - order fulfilment with the fewest leftover units and packs
//!
//! Given an order quantity and the allowed pack sizes, packfill chooses how
//! many containers of each size to ship so that the order is covered with the
//! least overpacking and, among equally tight fulfilments, the fewest
//! containers.
//!
//! packfill can be used in two ways:
//! - **CLI**: run `packfill calculate <QUANTITY>` against a local pack size store
//! - **Library**: call [`calculate`] directly, or wrap a
//!   [`PackSizeRepository`](packfill_store::PackSizeRepository) in a
//!   [`PackService`](service::PackService)
//!
//! # Quick Start (Library)
//!
//! ```rust
//! use packfill::calculate;
//!
//! let result = calculate(12001, &[250, 500, 1000, 2000, 5000]).unwrap();
//! assert_eq!(result.total_items(), 12250);
//! assert_eq!(result.total_packs(), 4);
//! assert_eq!(result.count_for(5000), 2);
//! ```
//!
//! # JSON Output
//!
//! The CLI emits JSON in JCS (RFC 8785) canonical form. Use [`emit_jcs`] for
//! the same encoding in your own integrations.

/// Optimal pack allocation for a quantity and a set of pack sizes.
pub use packfill_optimizer::{
    Allocation, OptimizerError, PackResult, calculate, calculate_with_cancel,
};

/// Configuration with discovery, precedence and source attribution.
pub use packfill_config::{CliArgs, Config, ConfigBuilder};

/// Library-level error type.
///
/// Library code returns `PackfillError` and does NOT call `std::process::exit()`.
pub use packfill_utils::error::{ErrorCategory, PackfillError, UserFriendlyError};

/// Exit codes matching the documented exit code table.
pub use packfill_utils::exit_codes::ExitCode;

/// JCS (RFC 8785) canonical JSON emission.
pub use packfill_utils::canonicalization::emit_jcs;

pub mod cli;
pub mod service;
pub mod types;

pub use service::{PackService, ServiceOptions};
pub use types::{FulfilmentReport, PackEntry};
