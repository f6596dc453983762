//! Exit code constants for packfill.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Operation completed successfully |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `INVALID_INPUT` | Invalid quantity or pack size |
//! | 4 | `NO_PACK_SIZES` | No pack sizes available |
//! | 5 | `NOT_FOUND` | Pack size does not exist |
//! | 6 | `STORE_FAILURE` | Corrupt store or lock failure |
//! | 130 | `CANCELLED` | Calculation cancelled |

/// Exit codes matching the documented exit code table.
///
/// The numeric values are part of the public API.
///
/// ```rust
/// use packfill_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::NO_PACK_SIZES, ExitCode::from_i32(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - operation completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid arguments or configuration
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Invalid input - non-positive or oversized quantity, non-positive pack size
    pub const INVALID_INPUT: ExitCode = ExitCode(3);

    /// No pack sizes - the store is empty
    pub const NO_PACK_SIZES: ExitCode = ExitCode(4);

    /// Not found - the pack size to remove does not exist
    pub const NOT_FOUND: ExitCode = ExitCode(5);

    /// Store failure - the store file is corrupt or could not be locked
    pub const STORE_FAILURE: ExitCode = ExitCode(6);

    /// Cancelled - the calculation was interrupted
    pub const CANCELLED: ExitCode = ExitCode(130);

    /// Get the numeric exit code value.
    ///
    /// Use this with `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    ///
    /// Prefer using the named constants when possible.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
