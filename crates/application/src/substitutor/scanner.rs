//! Placeholder scanner
//!
//! Splits a string into literal text and balanced `open ... close` spans in a
//! single forward pass.

use stencil_domain::delimiter::DelimiterSpec;
use stencil_domain::placeholder::PlaceholderSpan;

/// One piece of scanned input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Text copied through unchanged.
    Literal(&'t str),

    /// A placeholder preceded by the escape marker; the marker is not part of
    /// the span.
    Escaped(PlaceholderSpan),

    /// A placeholder to resolve.
    Placeholder(PlaceholderSpan),
}

/// Iterator over the [`Segment`]s of a string.
///
/// Concatenating the literal text and the source of every span, minus the
/// escape markers, reproduces the input.
///
/// # Examples
///
/// ```
/// use stencil_application::substitutor::{Scanner, Segment};
/// use stencil_domain::delimiter::DelimiterSpec;
///
/// let spec = DelimiterSpec::dollar_brace();
/// let segments: Vec<_> = Scanner::new(&spec, "a ${x}").collect();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0], Segment::Literal("a "));
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'s, 't> {
    spec: &'s DelimiterSpec,
    text: &'t str,
    position: usize,
    pending: Option<Segment<'t>>,
}

impl<'s, 't> Scanner<'s, 't> {
    /// Creates a scanner over `text`.
    #[must_use]
    pub const fn new(spec: &'s DelimiterSpec, text: &'t str) -> Self {
        Self {
            spec,
            text,
            position: 0,
            pending: None,
        }
    }

    fn rest_as_literal(&mut self) -> Option<Segment<'t>> {
        let rest = self.text.get(self.position..).unwrap_or_default();
        self.position = self.text.len();
        (!rest.is_empty()).then_some(Segment::Literal(rest))
    }
}

impl<'t> Iterator for Scanner<'_, 't> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }

        if self.position >= self.text.len() {
            return None;
        }

        let Some(open_at) = self.spec.find_open(self.text, self.position) else {
            return self.rest_as_literal();
        };

        let key_start = open_at + self.spec.open().len();
        let Some(close_at) = self.spec.find_close(self.text, key_start) else {
            return self.rest_as_literal();
        };

        let end = close_at + self.spec.close().len();
        let raw_key = self.text.get(key_start..close_at).unwrap_or_default();

        // The marker must lie in text not yet consumed by a previous span.
        let escaped = open_at > self.position && self.spec.is_escaped_at(self.text, open_at);
        let (literal_end, span) = if escaped {
            (
                open_at - 1,
                Segment::Escaped(PlaceholderSpan::escaped(open_at, end, raw_key)),
            )
        } else {
            (
                open_at,
                Segment::Placeholder(PlaceholderSpan::new(open_at, end, raw_key)),
            )
        };

        let literal = self.text.get(self.position..literal_end).unwrap_or_default();
        self.position = end;

        if literal.is_empty() {
            Some(span)
        } else {
            self.pending = Some(span);
            Some(Segment::Literal(literal))
        }
    }
}

/// Returns every balanced span in `text`, escaped ones included.
#[must_use]
pub fn placeholders(spec: &DelimiterSpec, text: &str) -> Vec<PlaceholderSpan> {
    Scanner::new(spec, text)
        .filter_map(|segment| match segment {
            Segment::Literal(_) => None,
            Segment::Escaped(span) | Segment::Placeholder(span) => Some(span),
        })
        .collect()
}

/// Extracts the raw keys of the non-escaped placeholders in `text`.
#[must_use]
pub fn extract_keys(spec: &DelimiterSpec, text: &str) -> Vec<String> {
    Scanner::new(spec, text)
        .filter_map(|segment| match segment {
            Segment::Placeholder(span) => Some(span.raw_key),
            _ => None,
        })
        .collect()
}

/// Returns true if `text` holds at least one non-escaped placeholder.
#[must_use]
pub fn has_placeholders(spec: &DelimiterSpec, text: &str) -> bool {
    Scanner::new(spec, text).any(|segment| matches!(segment, Segment::Placeholder(_)))
}
