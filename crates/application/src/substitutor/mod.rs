//! Placeholder substitution module
//!
//! Scans text for `open ... close` placeholders and replaces them with values
//! from a [`Lookup`](stencil_domain::lookup::Lookup).
//!
//! # Usage
//!
//! ```
//! use stencil_application::substitutor::Substitutor;
//! use stencil_domain::delimiter::DelimiterSpec;
//! use stencil_domain::store::{LayeredStore, StoreLayer, StoreScope};
//!
//! let store = LayeredStore::new().with_layer(StoreLayer::from_pairs(
//!     "defaults",
//!     StoreScope::Default,
//!     [("host", "localhost")],
//! ));
//!
//! let substitutor = Substitutor::new(DelimiterSpec::dollar_brace(), store);
//! assert_eq!(
//!     substitutor.replace_str("http://${host}:${port:-8080}/api"),
//!     "http://localhost:8080/api"
//! );
//! ```

pub mod engine;
pub mod scanner;

pub use engine::{ResolvedPlaceholder, SubstitutionReport, Substitutor};
pub use scanner::{Scanner, Segment, extract_keys, has_placeholders, placeholders};
