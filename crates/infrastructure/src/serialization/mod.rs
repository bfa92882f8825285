//! Parsing of store documents.
//!
//! Every supported format is read into a `serde_json::Value` so the rest of
//! the workspace only deals with one document model.

mod formats;

pub use formats::*;
