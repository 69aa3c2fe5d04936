//! Error types for index adjustment.
//!
//! Every failure is surfaced to the immediate caller. There is no partial
//! success: either a complete allocation is returned or one of these errors.

use thiserror::Error;

/// Result type for adjustment operations.
pub type AdjustResult<T> = Result<T, AdjustError>;

/// Errors that can occur while building candidates or allocating lots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdjustError {
    /// Filtering removed every candidate.
    #[error("Not enough data for adjusting: no candidates left after filtering")]
    EmptyCandidateSet,

    /// Budget is zero or negative.
    #[error("Invalid budget: {budget} (must be positive)")]
    InvalidBudget {
        /// The rejected budget.
        budget: String,
    },

    /// A candidate has a zero or negative price.
    #[error("Non-positive price for ticker '{ticker}': {price}")]
    NonPositivePrice {
        /// The ticker identifier.
        ticker: String,
        /// The rejected price.
        price: String,
    },

    /// A candidate has a zero or negative weight.
    #[error("Invalid weight for ticker '{ticker}': {weight}")]
    InvalidWeight {
        /// The ticker identifier.
        ticker: String,
        /// The rejected weight.
        weight: String,
    },

    /// The same ticker appears twice in one candidate set.
    #[error("Duplicate ticker '{ticker}' in candidate set")]
    DuplicateTicker {
        /// The duplicated ticker identifier.
        ticker: String,
    },

    /// PE quantile outside [0, 100].
    #[error("Invalid PE quantile: {quantile} (must be within 0..=100)")]
    InvalidQuantile {
        /// The rejected quantile.
        quantile: String,
    },

    /// Allocator settings are unusable.
    #[error("Invalid allocator configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// The virtual-spend search hit its iteration bound.
    #[error("Budget search did not converge within {iterations} iterations")]
    ConvergenceFailure {
        /// Iterations performed before giving up.
        iterations: usize,
    },
}

impl AdjustError {
    /// Create an invalid budget error.
    #[must_use]
    pub fn invalid_budget(budget: impl ToString) -> Self {
        Self::InvalidBudget {
            budget: budget.to_string(),
        }
    }

    /// Create a non-positive price error.
    #[must_use]
    pub fn non_positive_price(ticker: impl Into<String>, price: impl ToString) -> Self {
        Self::NonPositivePrice {
            ticker: ticker.into(),
            price: price.to_string(),
        }
    }

    /// Create an invalid weight error.
    #[must_use]
    pub fn invalid_weight(ticker: impl Into<String>, weight: impl ToString) -> Self {
        Self::InvalidWeight {
            ticker: ticker.into(),
            weight: weight.to_string(),
        }
    }

    /// Create a duplicate ticker error.
    #[must_use]
    pub fn duplicate_ticker(ticker: impl Into<String>) -> Self {
        Self::DuplicateTicker {
            ticker: ticker.into(),
        }
    }

    /// Create an invalid quantile error.
    #[must_use]
    pub fn invalid_quantile(quantile: impl ToString) -> Self {
        Self::InvalidQuantile {
            quantile: quantile.to_string(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
