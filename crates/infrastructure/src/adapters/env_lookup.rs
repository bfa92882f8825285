//! Process environment adapter

use stencil_domain::lookup::Lookup;
use stencil_domain::store::{Variable, VariableMap};

/// Looks keys up in the process environment under a fixed prefix.
///
/// With prefix `APP_`, the key `HOST` reads the variable `APP_HOST`.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnvLookup {
    prefix: String,
}

impl ProcessEnvLookup {
    /// Creates a lookup reading variables that start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The variable name prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Captures every matching variable, keyed without the prefix.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn snapshot(&self) -> VariableMap {
        std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .filter_map(|(name, value)| {
                let key = name.strip_prefix(self.prefix.as_str())?;
                (!key.is_empty()).then(|| (key.to_string(), Variable::new(value)))
            })
            .collect()
    }
}

impl Lookup for ProcessEnvLookup {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}{key}", self.prefix)).ok()
    }
}
