//! Application error types

use stencil_domain::DomainError;
use thiserror::Error;

use crate::ports::StoreError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A store could not be loaded.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Strict rendering left placeholders without a value.
    #[error("unresolved placeholders: {}", .0.join(", "))]
    Unresolved(Vec<String>),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
