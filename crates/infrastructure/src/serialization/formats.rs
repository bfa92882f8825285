//! JSON and YAML readers.

use std::path::Path;

use serde_json::Value;

/// Error type for deserialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Document formats a store can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl StoreFormat {
    /// Picks the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Returns a human-readable name for the format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// Parses `text` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid document.
    pub fn parse(self, text: &str) -> Result<Value, SerializationError> {
        match self {
            Self::Json => from_json_str(text),
            Self::Yaml => from_yaml_str(text),
        }
    }
}

/// Deserializes a JSON document.
///
/// # Errors
///
/// Returns an error if the JSON is invalid.
pub fn from_json_str(text: &str) -> Result<Value, SerializationError> {
    Ok(serde_json::from_str(text)?)
}

/// Deserializes a YAML document into the JSON document model.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or uses non-string mapping keys.
pub fn from_yaml_str(text: &str) -> Result<Value, SerializationError> {
    Ok(serde_yaml::from_str(text)?)
}
