//! Stencil Domain - Core placeholder types
//!
//! This crate defines the configuration and value types of the Stencil
//! placeholder engine. All types here are pure Rust with no I/O dependencies.

pub mod delimiter;
pub mod error;
pub mod lookup;
pub mod placeholder;
pub mod store;

pub use delimiter::{DelimiterSpec, ESCAPE_MARKER};
pub use error::{DomainError, DomainResult};
pub use lookup::{ChainLookup, FnLookup, Lookup, PrefixLookup, from_fn};
pub use placeholder::{DEFAULT_SEPARATOR, PlaceholderSpan, ResolvedKey};
pub use store::{
    LayeredStore, RecordStore, ResolvedValue, StoreLayer, StoreScope, Variable, VariableMap,
    flatten_record,
};
