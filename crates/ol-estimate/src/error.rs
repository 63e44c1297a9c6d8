//! Estimation errors.

use thiserror::Error;

/// Result type for estimation operations.
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Errors that can occur during property estimation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// A requested physical function cannot be estimated from the
    /// available measurements. Never silently defaulted.
    #[error("Insufficient assay data to estimate {what} for '{identifier}'")]
    InsufficientData {
        identifier: String,
        what: &'static str,
    },
}

impl EstimateError {
    pub(crate) fn insufficient(identifier: &str, what: &'static str) -> Self {
        Self::InsufficientData {
            identifier: identifier.to_string(),
            what,
        }
    }
}
