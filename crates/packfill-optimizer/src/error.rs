use thiserror::Error;

/// Errors returned by the pack search.
///
/// All variants are returned to the immediate caller; none of them are
/// retryable since the search is a pure function of its inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptimizerError {
    /// The requested quantity was zero.
    #[error("Invalid quantity: {quantity} (must be a positive integer)")]
    InvalidQuantity { quantity: u64 },

    /// No pack sizes were supplied.
    #[error("No pack sizes available")]
    EmptySizeSet,

    /// The bounded search reached no total in `[quantity, limit]`.
    ///
    /// Only happens when no positive size was supplied, so it indicates a
    /// violated precondition upstream.
    #[error("No valid pack combination found for quantity {quantity} (search limit {limit})")]
    SearchExhausted { quantity: u64, limit: u64 },

    /// The quantity is too large to search.
    #[error("Quantity {quantity} exceeds the maximum of {max}")]
    QuantityTooLarge { quantity: u64, max: u64 },

    /// The caller asked the search to stop.
    #[error("Pack calculation cancelled")]
    Cancelled,
}

impl OptimizerError {
    /// Whether this error signals a defect rather than bad input
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::SearchExhausted { .. })
    }
}
