//! Key/value lookup capability
//!
//! The engine only ever asks one question of its collaborator: "what is the
//! value for this key?". Anything that can answer it implements [`Lookup`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Resolves a key to a value.
///
/// Implementations must be total: a key without a value yields `None`, never
/// a panic.
pub trait Lookup: Send + Sync {
    /// Returns the value for `key`, if any.
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<L: Lookup + ?Sized> Lookup for Box<L> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: BuildHasher + Send + Sync> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Adapts a closure into a [`Lookup`]. Built by [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnLookup<F>(F);

impl<F> fmt::Debug for FnLookup<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnLookup")
    }
}

impl<F> Lookup for FnLookup<F>
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

/// Wraps a closure as a [`Lookup`].
///
/// # Examples
///
/// ```
/// use stencil_domain::lookup::{Lookup, from_fn};
///
/// let upper = from_fn(|key: &str| Some(key.to_uppercase()));
/// assert_eq!(upper.lookup("abc"), Some("ABC".to_string()));
/// ```
pub const fn from_fn<F>(f: F) -> FnLookup<F>
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    FnLookup(f)
}

/// Answers only keys carrying `prefix`, forwarding the rest of the key.
///
/// Lets several records share one placeholder namespace, e.g. `.input.name`
/// served by one record and `.response.status` by another.
#[derive(Debug, Clone)]
pub struct PrefixLookup<L> {
    prefix: String,
    inner: L,
}

impl<L: Lookup> PrefixLookup<L> {
    /// Routes keys starting with `prefix` to `inner`.
    pub fn new(prefix: impl Into<String>, inner: L) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }

    /// The routed key prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl<L: Lookup> Lookup for PrefixLookup<L> {
    fn lookup(&self, key: &str) -> Option<String> {
        key.strip_prefix(self.prefix.as_str())
            .and_then(|rest| self.inner.lookup(rest))
    }
}

/// Ordered list of lookups; the first one with a value wins.
#[derive(Default)]
pub struct ChainLookup {
    sources: Vec<Box<dyn Lookup>>,
}

impl ChainLookup {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source with lower priority than those already present.
    #[must_use]
    pub fn with(mut self, source: impl Lookup + 'static) -> Self {
        self.push(source);
        self
    }

    /// Appends a source with lower priority than those already present.
    pub fn push(&mut self, source: impl Lookup + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Number of sources in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if the chain has no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for ChainLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainLookup")
            .field("sources", &self.sources.len())
            .finish()
    }
}

impl Lookup for ChainLookup {
    fn lookup(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.lookup(key))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_hash_map_lookup() {
        let store = map(&[("x", "Y")]);
        assert_eq!(store.lookup("x"), Some("Y".to_string()));
        assert_eq!(store.lookup("z"), None);
    }

    #[test]
    fn test_btree_map_lookup() {
        let store: BTreeMap<String, String> = BTreeMap::from([("k".to_string(), "v".to_string())]);
        assert_eq!(store.lookup("k"), Some("v".to_string()));
    }

    #[test]
    fn test_reference_and_arc_lookup() {
        let store = map(&[("x", "Y")]);
        let by_ref = &store;
        assert_eq!(by_ref.lookup("x"), Some("Y".to_string()));

        let shared: Arc<dyn Lookup> = Arc::new(store);
        assert_eq!(shared.lookup("x"), Some("Y".to_string()));
    }

    #[test]
    fn test_fn_lookup() {
        let lookup = from_fn(|key: &str| (key == "hit").then(|| "value".to_string()));
        assert_eq!(lookup.lookup("hit"), Some("value".to_string()));
        assert_eq!(lookup.lookup("miss"), None);
    }

    #[test]
    fn test_chain_first_hit_wins() {
        let chain = ChainLookup::new()
            .with(map(&[("a", "first")]))
            .with(map(&[("a", "second"), ("b", "only-second")]));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.lookup("a"), Some("first".to_string()));
        assert_eq!(chain.lookup("b"), Some("only-second".to_string()));
        assert_eq!(chain.lookup("c"), None);
    }

    #[test]
    fn test_prefix_lookup_strips_prefix() {
        let lookup = PrefixLookup::new(".input", map(&[(".name", "ada")]));
        assert_eq!(lookup.prefix(), ".input");
        assert_eq!(lookup.lookup(".input.name"), Some("ada".to_string()));
        assert_eq!(lookup.lookup(".response.name"), None);
        assert_eq!(lookup.lookup(".name"), None);
    }

    #[test]
    fn test_chain_of_prefixed_sources() {
        let chain = ChainLookup::new()
            .with(PrefixLookup::new(".input", map(&[(".id", "in")])))
            .with(PrefixLookup::new(".response", map(&[(".id", "out")])))
            .with(map(&[("plain", "p")]));

        assert_eq!(chain.lookup(".input.id"), Some("in".to_string()));
        assert_eq!(chain.lookup(".response.id"), Some("out".to_string()));
        assert_eq!(chain.lookup("plain"), Some("p".to_string()));
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainLookup::new();
        assert!(chain.is_empty());
        assert_eq!(chain.lookup("anything"), None);
    }
}
