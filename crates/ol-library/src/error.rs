//! Facade errors.

use thiserror::Error;

/// Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors surfaced by [`crate::OilLibrary`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LibraryError {
    /// No record exists under the normalized identifier.
    #[error("No oil named '{identifier}' in the library")]
    OilNotFound { identifier: String },

    /// The stored record failed normalization.
    #[error(transparent)]
    Assay(#[from] ol_assay::AssayError),

    /// The record normalized cleanly but could not support estimation.
    #[error(transparent)]
    Estimate(#[from] ol_estimate::EstimateError),
}
