//! Store variable types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::lookup::Lookup;

/// Represents a single stored value with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// The variable value.
    pub value: String,

    /// Whether this variable is visible to lookups.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl Variable {
    /// Creates a new enabled variable.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled variable.
    #[must_use]
    pub fn disabled(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            enabled: false,
        }
    }

    /// Returns the value if the variable is enabled.
    #[must_use]
    pub fn enabled_value(&self) -> Option<&str> {
        if self.enabled {
            Some(&self.value)
        } else {
            None
        }
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Variable {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A collection of variables keyed by name.
pub type VariableMap = HashMap<String, Variable>;

impl Lookup for VariableMap {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(Variable::enabled_value)
            .map(str::to_string)
    }
}

/// Origin of a store layer, ordered by precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreScope {
    /// Built-in defaults - lowest precedence
    Default = 0,
    /// Values read from store files
    File = 1,
    /// Values read from process environment variables
    Environment = 2,
    /// Values given explicitly by the caller - highest precedence
    Override = 3,
}

impl StoreScope {
    /// Returns the precedence level (higher = takes priority).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        *self as u8
    }

    /// Returns a human-readable name for the scope.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::File => "File",
            Self::Environment => "Environment",
            Self::Override => "Override",
        }
    }
}

/// A resolved value with the layer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    /// The key that was looked up.
    pub key: String,
    /// The resolved value.
    pub value: String,
    /// The scope of the layer that answered.
    pub scope: StoreScope,
    /// The name of the layer that answered.
    pub layer: String,
}
