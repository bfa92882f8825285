//! Store repository port
//!
//! Defines the interface for loading value stores from external documents.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use stencil_domain::DomainError;
use stencil_domain::store::VariableMap;

use super::file_system::FileSystemError;

/// Errors that can occur while loading a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store document does not exist.
    #[error("Store file not found: {0}")]
    NotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file extension does not name a supported format.
    #[error("Unsupported store format: {0}")]
    UnsupportedFormat(String),

    /// The document could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Path of the offending document.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The document parsed but does not have the shape of a store.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<FileSystemError> for StoreError {
    fn from(error: FileSystemError) -> Self {
        match error {
            FileSystemError::NotFound(path) => Self::NotFound(path),
            FileSystemError::PermissionDenied(path) => Self::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                path.display().to_string(),
            )),
            FileSystemError::Io(e) => Self::Io(e),
        }
    }
}

/// Repository trait for store documents (JSON, YAML, ...).
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Loads a document as a flat variable map (`server.port = 8080`).
    ///
    /// # Arguments
    /// * `path` - Path to the store document
    ///
    /// # Errors
    /// Returns an error if the document cannot be read, parsed, or is not a mapping.
    async fn load_variables(&self, path: &Path) -> Result<VariableMap, StoreError>;

    /// Loads a document as a structured record.
    ///
    /// # Arguments
    /// * `path` - Path to the record document
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or parsed.
    async fn load_record(&self, path: &Path) -> Result<Value, StoreError>;
}
