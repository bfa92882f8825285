//! Layered value store
//!
//! Holds several variable sources and answers lookups with proper precedence.

use crate::lookup::Lookup;

use super::variable::{ResolvedValue, StoreScope, Variable, VariableMap};

/// One named source of variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayer {
    /// Layer name (file path, "env", ...), for display purposes.
    pub name: String,

    /// Precedence of this layer.
    pub scope: StoreScope,

    /// Variables held by this layer.
    pub variables: VariableMap,
}

impl StoreLayer {
    /// Creates a layer from an existing variable map.
    #[must_use]
    pub fn new(name: impl Into<String>, scope: StoreScope, variables: VariableMap) -> Self {
        Self {
            name: name.into(),
            scope,
            variables,
        }
    }

    /// Creates a layer from plain key/value pairs.
    pub fn from_pairs<I, K, V>(name: impl Into<String>, scope: StoreScope, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let variables = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Variable::new(v)))
            .collect();
        Self::new(name, scope, variables)
    }
}

/// Variables resolved in order of precedence (highest wins):
/// 1. Override (explicit `KEY=VALUE` pairs)
/// 2. Environment (process environment variables)
/// 3. File (store files, later files win over earlier ones)
/// 4. Default
///
/// Disabled variables are invisible and let lower layers answer.
#[derive(Debug, Clone, Default)]
pub struct LayeredStore {
    layers: Vec<StoreLayer>,
}

impl LayeredStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer.
    #[must_use]
    pub fn with_layer(mut self, layer: StoreLayer) -> Self {
        self.push_layer(layer);
        self
    }

    /// Adds a layer. Among layers of equal scope, the one added last wins.
    pub fn push_layer(&mut self, layer: StoreLayer) {
        self.layers.push(layer);
    }

    /// Returns the layers in insertion order.
    #[must_use]
    pub fn layers(&self) -> &[StoreLayer] {
        &self.layers
    }

    /// Returns true if no layer has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Resolves a key to its value and origin.
    /// Returns None if no layer holds an enabled variable for it.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<ResolvedValue> {
        self.layers
            .iter()
            .filter_map(|layer| {
                layer
                    .variables
                    .get(key)
                    .and_then(Variable::enabled_value)
                    .map(|value| (layer, value))
            })
            .max_by_key(|(layer, _)| layer.scope)
            .map(|(layer, value)| ResolvedValue {
                key: key.to_string(),
                value: value.to_string(),
                scope: layer.scope,
                layer: layer.name.clone(),
            })
    }

    /// Resolves a key to just its value.
    #[must_use]
    pub fn resolve_value(&self, key: &str) -> Option<String> {
        self.resolve(key).map(|r| r.value)
    }

    /// Returns all keys across all layers, sorted and deduplicated.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .layers
            .iter()
            .flat_map(|layer| layer.variables.keys())
            .cloned()
            .collect();

        keys.sort();
        keys.dedup();
        keys
    }

    /// Returns the count of distinct keys across all layers.
    #[must_use]
    pub fn total_key_count(&self) -> usize {
        self.all_keys().len()
    }
}

impl Lookup for LayeredStore {
    fn lookup(&self, key: &str) -> Option<String> {
        self.resolve_value(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn create_test_store() -> LayeredStore {
        LayeredStore::new()
            .with_layer(StoreLayer::from_pairs(
                "defaults",
                StoreScope::Default,
                [("app_name", "TestApp"), ("api_version", "v1")],
            ))
            .with_layer(StoreLayer::from_pairs(
                "vars.json",
                StoreScope::File,
                [("base_url", "http://localhost:3000"), ("api_version", "v2")],
            ))
            .with_layer(StoreLayer::from_pairs(
                "env",
                StoreScope::Environment,
                [("api_key", "sk-env")],
            ))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = LayeredStore::new();
        assert!(store.is_empty());
        assert!(store.resolve("anything").is_none());
    }

    #[test]
    fn test_resolve_reports_origin() {
        let store = create_test_store();

        let resolved = store.resolve("base_url").expect("Should resolve");
        assert_eq!(resolved.value, "http://localhost:3000");
        assert_eq!(resolved.scope, StoreScope::File);
        assert_eq!(resolved.layer, "vars.json");
    }

    #[test]
    fn test_precedence_file_over_default() {
        let store = create_test_store();

        let resolved = store.resolve("api_version").expect("Should resolve");
        assert_eq!(resolved.value, "v2");
        assert_eq!(resolved.scope, StoreScope::File);
    }

    #[test]
    fn test_precedence_does_not_depend_on_insertion_order() {
        let store = LayeredStore::new()
            .with_layer(StoreLayer::from_pairs(
                "cli",
                StoreScope::Override,
                [("key", "override")],
            ))
            .with_layer(StoreLayer::from_pairs("vars.yaml", StoreScope::File, [("key", "file")]));

        assert_eq!(store.resolve_value("key"), Some("override".to_string()));
    }

    #[test]
    fn test_later_layer_wins_within_same_scope() {
        let store = LayeredStore::new()
            .with_layer(StoreLayer::from_pairs("a.json", StoreScope::File, [("key", "a")]))
            .with_layer(StoreLayer::from_pairs("b.json", StoreScope::File, [("key", "b")]));

        let resolved = store.resolve("key").expect("Should resolve");
        assert_eq!(resolved.value, "b");
        assert_eq!(resolved.layer, "b.json");
    }

    #[test]
    fn test_disabled_variable_falls_through() {
        let mut overrides = VariableMap::new();
        overrides.insert("key".to_string(), Variable::disabled("hidden"));

        let store = LayeredStore::new()
            .with_layer(StoreLayer::from_pairs("vars.json", StoreScope::File, [("key", "file")]))
            .with_layer(StoreLayer::new("cli", StoreScope::Override, overrides));

        assert_eq!(store.resolve_value("key"), Some("file".to_string()));
    }

    #[test]
    fn test_all_keys_sorted_and_deduplicated() {
        let store = create_test_store();

        assert_eq!(
            store.all_keys(),
            vec!["api_key", "api_version", "app_name", "base_url"]
        );
        assert_eq!(store.total_key_count(), 4);
    }

    #[test]
    fn test_lookup_trait() {
        let store = create_test_store();
        let lookup: &dyn Lookup = &store;
        assert_eq!(lookup.lookup("api_key"), Some("sk-env".to_string()));
        assert_eq!(lookup.lookup("missing"), None);
    }
}
