//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The placeholder start marker is empty.
    #[error("open delimiter must not be empty")]
    EmptyOpenDelimiter,

    /// The placeholder end marker is empty.
    #[error("close delimiter must not be empty")]
    EmptyCloseDelimiter,

    /// A record path does not follow the `.field.field` form.
    #[error("invalid record path: {0}")]
    InvalidRecordPath(String),

    /// A store entry holds a value that cannot be used as text.
    #[error("invalid value for '{key}': {reason}")]
    InvalidStoreValue {
        /// The offending key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
