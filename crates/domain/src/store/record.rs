//! Structured record access
//!
//! Placeholders such as `{.input.user.name}` address fields of a structured
//! record. [`RecordStore`] answers those keys by walking a JSON value.

use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::lookup::Lookup;

use super::variable::{Variable, VariableMap};

/// Nested-field accessor over a single record.
///
/// Keys are dot paths: `.user.name`, `.items.0.id`. A lone `.` selects the
/// whole record.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stencil_domain::lookup::Lookup;
/// use stencil_domain::store::RecordStore;
///
/// let store = RecordStore::new(json!({"user": {"name": "ada", "age": 36}}));
/// assert_eq!(store.lookup(".user.name"), Some("ada".to_string()));
/// assert_eq!(store.lookup(".user.age"), Some("36".to_string()));
/// assert_eq!(store.lookup(".user.email"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordStore {
    record: Value,
}

impl RecordStore {
    /// Wraps a record.
    #[must_use]
    pub const fn new(record: Value) -> Self {
        Self { record }
    }

    /// Returns the wrapped record.
    #[must_use]
    pub const fn record(&self) -> &Value {
        &self.record
    }

    /// Selects the value at `path`.
    ///
    /// Returns `Ok(None)` when the path is well formed but absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not start with `.` or contains an
    /// empty segment.
    pub fn select(&self, path: &str) -> DomainResult<Option<&Value>> {
        let Some(rest) = path.strip_prefix('.') else {
            return Err(DomainError::InvalidRecordPath(path.to_string()));
        };

        if rest.is_empty() {
            return Ok(Some(&self.record));
        }

        let mut current = &self.record;
        for segment in rest.split('.') {
            if segment.is_empty() {
                return Err(DomainError::InvalidRecordPath(path.to_string()));
            }

            let next = match current {
                Value::Object(fields) => fields.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };

            match next {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }

        Ok(Some(current))
    }

    /// Returns the text of the value at `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<String> {
        self.select(path).ok().flatten().and_then(render_value)
    }
}

impl From<Value> for RecordStore {
    fn from(record: Value) -> Self {
        Self::new(record)
    }
}

impl Lookup for RecordStore {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key)
    }
}

/// Renders a JSON value as substitution text.
///
/// Strings are returned bare, `null` has no text, everything else uses its
/// compact JSON form.
#[must_use]
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Flattens a structured document into dot-joined keys.
///
/// `{"server": {"port": 8080}}` becomes `server.port = 8080`; array elements
/// use their index (`hosts.0`). `null` leaves are skipped.
///
/// # Errors
///
/// Returns an error if the document root is not a mapping.
pub fn flatten_record(document: &Value) -> DomainResult<VariableMap> {
    let Value::Object(fields) = document else {
        return Err(DomainError::InvalidStoreValue {
            key: "<root>".to_string(),
            reason: format!("expected a mapping, found {}", kind_of(document)),
        });
    };

    let mut variables = VariableMap::new();
    for (key, value) in fields {
        flatten_into(key, value, &mut variables);
    }
    Ok(variables)
}

fn flatten_into(prefix: &str, value: &Value, variables: &mut VariableMap) {
    match value {
        Value::Object(fields) => {
            for (key, child) in fields {
                flatten_into(&format!("{prefix}.{key}"), child, variables);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(&format!("{prefix}.{index}"), child, variables);
            }
        }
        leaf => {
            if let Some(text) = render_value(leaf) {
                variables.insert(prefix.to_string(), Variable::new(text));
            }
        }
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
