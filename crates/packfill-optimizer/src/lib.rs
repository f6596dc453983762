//! Pack allocation search for packfill
//!
//! Given a requested quantity and the set of allowed pack sizes, this crate
//! finds the allocation that ships the fewest surplus units and, among those,
//! uses the fewest packs.
//!
//! # Example
//!
//! ```rust
//! use packfill_optimizer::calculate;
//!
//! let result = calculate(501, &[250, 500, 1000, 2000, 5000])?;
//! assert_eq!(result.total_items(), 750);
//! assert_eq!(result.total_packs(), 2);
//! assert_eq!(result.count_for(500), 1);
//! assert_eq!(result.count_for(250), 1);
//! # Ok::<(), packfill_optimizer::OptimizerError>(())
//! ```

pub mod error;
pub mod result;
mod search;

pub use error::OptimizerError;
pub use result::{Allocation, PackResult};
pub use search::{CANCEL_POLL_INTERVAL, calculate, calculate_with_cancel, search_limit};
