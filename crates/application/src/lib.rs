//! Stencil Application - Substitution engine, use cases and ports
//!
//! This crate defines the application layer with:
//! - The placeholder substitution engine
//! - Port traits (interfaces for external dependencies)
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod substitutor;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use substitutor::{SubstitutionReport, Substitutor};
pub use use_cases::{RecordSource, RenderInput, RenderOutput, RenderTemplate};
