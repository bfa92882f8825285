//! Infrastructure adapters

mod env_lookup;

pub use env_lookup::ProcessEnvLookup;
