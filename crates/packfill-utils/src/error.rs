use std::fmt;
use thiserror::Error;
pub use packfill_optimizer::OptimizerError;

/// Library-level error type with context and user-friendly reporting.
///
/// `PackfillError` is the error returned by packfill's service and command
/// layers. It wraps the typed errors of each crate and maps them onto the CLI
/// exit code table.
///
/// # Exit Code Mapping
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration errors |
/// | 3 | Invalid quantity or pack size |
/// | 4 | No pack sizes available |
/// | 5 | Pack size not found |
/// | 6 | Corrupt store, lock or write failure |
/// | 130 | Calculation cancelled |
/// | 1 | Other errors |
///
/// # Example
///
/// ```rust
/// use packfill_utils::error::{OptimizerError, PackfillError};
/// use packfill_utils::exit_codes::ExitCode;
///
/// let err = PackfillError::from(OptimizerError::EmptySizeSet);
/// assert_eq!(err.to_exit_code(), ExitCode::NO_PACK_SIZES);
/// assert!(err.display_for_user().contains("Suggestions:"));
/// ```
///
/// Library code returns `PackfillError` and never calls `std::process::exit()`.
#[derive(Error, Debug)]
pub enum PackfillError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pack calculation error: {0}")]
    Optimizer(#[from] OptimizerError),

    #[error("Pack size store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Calculation,
    Storage,
    FileSystem,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::Calculation => write!(f, "Calculation"),
            Self::Storage => write!(f, "Storage"),
            Self::FileSystem => write!(f, "File System"),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => {
                format!("Configuration file has invalid format: {reason}")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => format!("Configuration file not found: {path}"),
            Self::DiscoveryFailed { reason } => {
                format!("Failed to discover configuration: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidFile(_) => Some(
                "Configuration files must be valid TOML with optional [defaults] and [store] sections."
                    .to_string(),
            ),
            Self::InvalidValue { key, .. } => Some(format!(
                "The '{key}' configuration option has specific format requirements."
            )),
            Self::NotFound { .. } | Self::DiscoveryFailed { .. } => Some(
                "packfill searches for .packfill/config.toml starting from the current directory upward, or reads $PACKFILL_HOME/config.toml."
                    .to_string(),
            ),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile(_) => vec![
                "Check the TOML syntax using a TOML validator".to_string(),
                "Run 'packfill config' to see the effective configuration".to_string(),
            ],
            Self::InvalidValue { key, .. } => match key.as_str() {
                "max_quantity" => vec![
                    "Use a positive integer no larger than 1000000000".to_string(),
                ],
                "initial_sizes" => vec![
                    "List distinct positive integers, e.g. initial_sizes = [250, 500, 1000]"
                        .to_string(),
                ],
                _ => vec!["Check the documentation for valid values".to_string()],
            },
            Self::NotFound { path } => vec![
                format!("Create the configuration file at {path}"),
                "Omit --config to use discovery and built-in defaults".to_string(),
            ],
            Self::DiscoveryFailed { .. } => vec![
                "Set PACKFILL_HOME to a directory containing config.toml".to_string(),
                "Pass --config with an explicit path".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

impl UserFriendlyError for OptimizerError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidQuantity { quantity } => {
                format!("Quantity {quantity} is not valid; orders must request at least one unit")
            }
            Self::EmptySizeSet => "No pack sizes are available".to_string(),
            Self::SearchExhausted { quantity, .. } => {
                format!("No valid pack combination was found for quantity {quantity}")
            }
            Self::QuantityTooLarge { quantity, max } => {
                format!("Quantity {quantity} is larger than the supported maximum of {max}")
            }
            Self::Cancelled => "Pack calculation was cancelled".to_string(),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidQuantity { .. } => {
                Some("Quantities must be positive whole numbers.".to_string())
            }
            Self::EmptySizeSet => Some(
                "A calculation needs at least one allowed pack size in the store.".to_string(),
            ),
            Self::SearchExhausted { limit, .. } => Some(format!(
                "The search explored every total up to {limit} without reaching the order. This indicates a non-positive pack size reached the calculation."
            )),
            Self::QuantityTooLarge { .. } => Some(
                "The search allocates one slot per unit up to the quantity plus twice the largest pack size, so a very large pack size lowers the maximum."
                    .to_string(),
            ),
            Self::Cancelled => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidQuantity { .. } => {
                vec!["Request a quantity of 1 or more".to_string()]
            }
            Self::EmptySizeSet => vec![
                "Add a pack size with 'packfill sizes add <SIZE>'".to_string(),
                "Set [store].initial_sizes in the configuration file".to_string(),
            ],
            Self::SearchExhausted { .. } => vec![
                "Run 'packfill sizes list' and remove any non-positive sizes".to_string(),
                "Report this as a bug if all sizes are positive".to_string(),
            ],
            Self::QuantityTooLarge { .. } => vec![
                "Split the order into smaller quantities".to_string(),
                "Remove unusually large pack sizes with 'packfill sizes remove <SIZE>'".to_string(),
                "Raise max_quantity in the [defaults] section if the machine has memory to spare"
                    .to_string(),
            ],
            Self::Cancelled => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidQuantity { .. } | Self::QuantityTooLarge { .. } => ErrorCategory::Input,
            Self::EmptySizeSet | Self::SearchExhausted { .. } | Self::Cancelled => {
                ErrorCategory::Calculation
            }
        }
    }
}

/// Pack size store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid pack size: {size} (must be a positive integer)")]
    InvalidPackSize { size: u64 },

    #[error("Pack size not found: {size}")]
    NotFound { size: u64 },

    #[error("Pack size store at {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Failed to lock pack size store at {path}: {reason}")]
    Lock { path: String, reason: String },

    #[error("Failed to write pack size store at {path}: {source:#}")]
    Write {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Pack size store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UserFriendlyError for StoreError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidPackSize { size } => {
                format!("Pack size {size} is not valid; sizes must be positive")
            }
            Self::NotFound { size } => format!("Pack size {size} does not exist"),
            Self::Corrupt { path, reason } => {
                format!("The pack size store at {path} could not be read: {reason}")
            }
            Self::Lock { path, .. } => {
                format!("Could not acquire the pack size store lock for {path}")
            }
            Self::Write { path, .. } => format!("Could not save the pack size store at {path}"),
            Self::Io(err) => format!("Pack size store I/O failed: {err}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Corrupt { .. } => Some(
                "The store is a JSON document of the form {\"version\":1,\"sizes\":[...]} with distinct positive sizes."
                    .to_string(),
            ),
            Self::Lock { reason, .. } => Some(reason.clone()),
            Self::Write { source, .. } => Some(format!("{source:#}")),
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPackSize { .. } => vec!["Use a pack size of 1 or more".to_string()],
            Self::NotFound { .. } => {
                vec!["Run 'packfill sizes list' to see the configured sizes".to_string()]
            }
            Self::Corrupt { path, .. } => vec![
                format!("Inspect or delete {path}; it is recreated from the configured initial sizes"),
            ],
            Self::Lock { .. } => vec![
                "Check that no other packfill process is modifying the store".to_string(),
            ],
            Self::Write { .. } => vec![
                "Check permissions and free space in the store directory".to_string(),
                "Point --store at a writable location".to_string(),
            ],
            Self::Io(_) => vec!["Check permissions on the store directory".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPackSize { .. } => ErrorCategory::Input,
            Self::Io(_) => ErrorCategory::FileSystem,
            _ => ErrorCategory::Storage,
        }
    }
}

impl UserFriendlyError for PackfillError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.user_message(),
            Self::Optimizer(err) => err.user_message(),
            Self::Store(err) => err.user_message(),
            Self::Io(err) => format!("File system operation failed: {err}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.context(),
            Self::Optimizer(err) => err.context(),
            Self::Store(err) => err.context(),
            Self::Io(_) => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(err) => err.suggestions(),
            Self::Optimizer(err) => err.suggestions(),
            Self::Store(err) => err.suggestions(),
            Self::Io(_) => vec!["Check file permissions and available disk space".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(err) => err.category(),
            Self::Optimizer(err) => err.category(),
            Self::Store(err) => err.category(),
            Self::Io(_) => ErrorCategory::FileSystem,
        }
    }
}

impl PackfillError {
    /// Get a user-friendly error message with context and actionable suggestions.
    ///
    /// ```text
    /// Error: <user message>
    ///
    /// Context: <context if available>
    ///
    /// Suggestions:
    ///   • <suggestion 1>
    /// ```
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = format!("Error: {}\n", self.user_message());

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the CLI exit code.
    ///
    /// ```rust
    /// use packfill_utils::error::{PackfillError, StoreError};
    /// use packfill_utils::exit_codes::ExitCode;
    ///
    /// let err = PackfillError::from(StoreError::NotFound { size: 42 });
    /// assert_eq!(err.to_exit_code(), ExitCode::NOT_FOUND);
    /// ```
    #[must_use]
    pub fn to_exit_code(&self) -> crate::exit_codes::ExitCode {
        use crate::exit_codes::ExitCode;

        match self {
            Self::Config(_) => ExitCode::CLI_ARGS,

            Self::Optimizer(err) => match err {
                OptimizerError::InvalidQuantity { .. }
                | OptimizerError::QuantityTooLarge { .. } => ExitCode::INVALID_INPUT,
                OptimizerError::EmptySizeSet => ExitCode::NO_PACK_SIZES,
                OptimizerError::Cancelled => ExitCode::CANCELLED,
                // Search exhaustion is a defect, not a user condition
                OptimizerError::SearchExhausted { .. } => ExitCode::INTERNAL,
            },

            Self::Store(err) => match err {
                StoreError::InvalidPackSize { .. } => ExitCode::INVALID_INPUT,
                StoreError::NotFound { .. } => ExitCode::NOT_FOUND,
                StoreError::Corrupt { .. }
                | StoreError::Lock { .. }
                | StoreError::Write { .. } => ExitCode::STORE_FAILURE,
                StoreError::Io(_) => ExitCode::INTERNAL,
            },

            Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}
