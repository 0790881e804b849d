//! Domain-level error types.

use thiserror::Error;

/// Domain errors - a submitted payload broke a business rule.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        DomainError::Validation(detail.into())
    }
}

/// Storage-level errors.
///
/// A missing or unreadable collection file is not an error; adapters recover
/// it to an empty collection. These variants only cover writes that failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
