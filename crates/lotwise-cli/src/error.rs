//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A numeric argument is not a decimal.
    #[error("Invalid decimal: '{0}'")]
    InvalidDecimal(String),

    /// A numeric argument is out of range.
    #[error("Invalid {name}: {value}. {expected}")]
    OutOfRange {
        /// Argument name.
        name: &'static str,
        /// Value given.
        value: String,
        /// What was expected.
        expected: &'static str,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
