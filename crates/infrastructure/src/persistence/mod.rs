//! Persistence implementations for file-based storage.

mod file_system;
mod store_repository;

pub use file_system::*;
pub use store_repository::*;
