//! Placeholder delimiter configuration
//!
//! A [`DelimiterSpec`] (the "key finder") names the token that opens a
//! placeholder, the token that closes it, and the key prefix a placeholder
//! must carry to be eligible for substitution.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker that suppresses a directly following open token.
pub const ESCAPE_MARKER: char = '\\';

/// Immutable placeholder syntax: open token, close token and key scope.
///
/// An empty scope means every placeholder is eligible.
///
/// # Examples
///
/// ```
/// use stencil_domain::delimiter::DelimiterSpec;
///
/// let spec = DelimiterSpec::new("${", "}", "").unwrap();
/// assert_eq!(spec.open(), "${");
/// assert!(!spec.is_scoped());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DelimiterSpecFile")]
pub struct DelimiterSpec {
    open: String,
    close: String,
    scope: String,
}

/// Unvalidated shape used when reading a spec from configuration.
#[derive(Deserialize)]
struct DelimiterSpecFile {
    open: String,
    close: String,
    #[serde(default)]
    scope: String,
}

impl TryFrom<DelimiterSpecFile> for DelimiterSpec {
    type Error = DomainError;

    fn try_from(file: DelimiterSpecFile) -> Result<Self, Self::Error> {
        Self::new(file.open, file.close, file.scope)
    }
}

impl DelimiterSpec {
    /// Creates a new spec.
    ///
    /// # Errors
    ///
    /// Returns an error if `open` or `close` is empty.
    pub fn new(
        open: impl Into<String>,
        close: impl Into<String>,
        scope: impl Into<String>,
    ) -> DomainResult<Self> {
        let open = open.into();
        let close = close.into();

        if open.is_empty() {
            return Err(DomainError::EmptyOpenDelimiter);
        }
        if close.is_empty() {
            return Err(DomainError::EmptyCloseDelimiter);
        }

        Ok(Self {
            open,
            close,
            scope: scope.into(),
        })
    }

    /// Creates a spec with no scope filtering.
    ///
    /// # Errors
    ///
    /// Returns an error if `open` or `close` is empty.
    pub fn unscoped(open: impl Into<String>, close: impl Into<String>) -> DomainResult<Self> {
        Self::new(open, close, "")
    }

    /// `${key}` placeholders.
    #[must_use]
    pub fn dollar_brace() -> Self {
        Self::preset("${", "}")
    }

    /// `{key}` placeholders.
    #[must_use]
    pub fn braces() -> Self {
        Self::preset("{", "}")
    }

    /// `[key]` placeholders.
    #[must_use]
    pub fn brackets() -> Self {
        Self::preset("[", "]")
    }

    fn preset(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            scope: String::new(),
        }
    }

    /// Returns a copy of this spec restricted to keys starting with `scope`.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// The placeholder start token.
    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// The placeholder end token.
    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }

    /// The key prefix required for substitution (may be empty).
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns true if placeholders are filtered by key prefix.
    #[must_use]
    pub fn is_scoped(&self) -> bool {
        !self.scope.is_empty()
    }

    /// Byte offset of the next open token at or after `from`.
    #[must_use]
    pub fn find_open(&self, text: &str, from: usize) -> Option<usize> {
        text.get(from..)?
            .find(self.open.as_str())
            .map(|offset| from + offset)
    }

    /// Returns true if the open token at `index` is preceded by [`ESCAPE_MARKER`].
    #[must_use]
    pub fn is_escaped_at(&self, text: &str, index: usize) -> bool {
        text.get(..index)
            .is_some_and(|before| before.ends_with(ESCAPE_MARKER))
    }

    /// Finds the close token balancing an open token that ends at `from`.
    ///
    /// Walks forward with a depth counter starting at 1: each full open token
    /// increments it, each full close token decrements it. The close token is
    /// tested first at every position, so identical open and close tokens pair
    /// up without nesting.
    ///
    /// Returns the byte offset where the balancing close token starts.
    #[must_use]
    pub fn find_close(&self, text: &str, from: usize) -> Option<usize> {
        let mut depth = 1_usize;
        let mut index = from;

        while let Some(rest) = text.get(index..) {
            if rest.is_empty() {
                break;
            }

            if rest.starts_with(self.close.as_str()) {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
                index += self.close.len();
            } else if rest.starts_with(self.open.as_str()) {
                depth += 1;
                index += self.open.len();
            } else {
                index += rest.chars().next().map_or(1, char::len_utf8);
            }
        }

        None
    }
}

impl Default for DelimiterSpec {
    fn default() -> Self {
        Self::dollar_brace()
    }
}
