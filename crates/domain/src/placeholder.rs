//! Placeholder spans and resolved keys
//!
//! Both types only live while a single input string is processed.

use std::ops::Range;

/// Separator between a lookup key and its inline default value.
pub const DEFAULT_SEPARATOR: &str = ":-";

/// A matched `open ... close` region of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpan {
    /// Byte offset of the open token.
    pub start: usize,

    /// Byte offset just past the close token.
    pub end: usize,

    /// Text strictly between the outermost open and close tokens, verbatim.
    pub raw_key: String,

    /// Whether the open token was preceded by the escape marker.
    pub escaped: bool,
}

impl PlaceholderSpan {
    /// Creates a span eligible for resolution.
    #[must_use]
    pub fn new(start: usize, end: usize, raw_key: impl Into<String>) -> Self {
        Self {
            start,
            end,
            raw_key: raw_key.into(),
            escaped: false,
        }
    }

    /// Creates a span that must be copied through without lookup.
    #[must_use]
    pub fn escaped(start: usize, end: usize, raw_key: impl Into<String>) -> Self {
        Self {
            escaped: true,
            ..Self::new(start, end, raw_key)
        }
    }

    /// Byte range of the span including its delimiters.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The original `open ... close` text this span covers.
    #[must_use]
    pub fn source<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.range()).unwrap_or_default()
    }
}

/// A raw key with its scope removed and its default value split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    /// Key passed to the lookup.
    pub lookup_key: String,

    /// Literal used when the lookup has no value.
    pub fallback: Option<String>,
}

impl ResolvedKey {
    /// Derives the lookup key from a raw placeholder key.
    ///
    /// Returns `None` when `scope` is non-empty and `raw_key` does not start
    /// with it.
    ///
    /// # Examples
    ///
    /// ```
    /// use stencil_domain::placeholder::ResolvedKey;
    ///
    /// let key = ResolvedKey::parse(".input.name:-anonymous", ".input").unwrap();
    /// assert_eq!(key.lookup_key, ".name");
    /// assert_eq!(key.fallback.as_deref(), Some("anonymous"));
    ///
    /// assert!(ResolvedKey::parse(".response.name", ".input").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw_key: &str, scope: &str) -> Option<Self> {
        raw_key.strip_prefix(scope).map(Self::split)
    }

    /// Splits a key on the first [`DEFAULT_SEPARATOR`].
    #[must_use]
    pub fn split(key: &str) -> Self {
        match key.split_once(DEFAULT_SEPARATOR) {
            Some((lookup_key, fallback)) => Self {
                lookup_key: lookup_key.to_string(),
                fallback: Some(fallback.to_string()),
            },
            None => Self {
                lookup_key: key.to_string(),
                fallback: None,
            },
        }
    }
}
