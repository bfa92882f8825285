//! Stencil Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus lookups backed by the process
//! environment.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::ProcessEnvLookup;
pub use persistence::{FileStoreRepository, TokioFileSystem};
pub use serialization::{SerializationError, StoreFormat, from_json_str, from_yaml_str};
