//! File-based store repository implementation.
//!
//! Store documents are JSON or YAML files; the extension selects the parser.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use stencil_application::ports::{FileSystem, StoreError, StoreRepository};
use stencil_domain::store::{VariableMap, flatten_record};
use tracing::debug;

use crate::serialization::StoreFormat;

/// File-based store repository.
///
/// A variables file such as:
/// ```yaml
/// server:
///   host: localhost
///   port: 8080
/// ```
/// is loaded as `server.host` and `server.port`.
#[derive(Debug, Clone)]
pub struct FileStoreRepository<F> {
    fs: F,
}

impl<F: FileSystem> FileStoreRepository<F> {
    /// Creates a new file-based store repository.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }
}

#[async_trait]
impl<F: FileSystem> StoreRepository for FileStoreRepository<F> {
    async fn load_variables(&self, path: &Path) -> Result<VariableMap, StoreError> {
        let document = self.load_record(path).await?;

        Ok(flatten_record(&document)?)
    }

    async fn load_record(&self, path: &Path) -> Result<Value, StoreError> {
        let format = StoreFormat::from_path(path)
            .ok_or_else(|| StoreError::UnsupportedFormat(path.display().to_string()))?;

        let content = self.fs.read_file_string(path).await?;

        let document = format.parse(&content).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), format = format.name(), "parsed store document");
        Ok(document)
    }
}
