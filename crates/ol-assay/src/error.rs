//! Assay ingestion errors.

use ol_core::UnitError;
use thiserror::Error;

/// Result type for assay operations.
pub type AssayResult<T> = Result<T, AssayError>;

/// Errors that can occur while normalizing an assay record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssayError {
    /// A measurement carried an unusable unit tag.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// A field value is unusable (non-finite, negative where forbidden,
    /// fraction outside [0, 1], ...).
    #[error("Invalid assay field for '{identifier}': {what}")]
    InvalidField {
        identifier: String,
        what: &'static str,
    },
}
