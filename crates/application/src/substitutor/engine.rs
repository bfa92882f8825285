//! Substitution engine
//!
//! Resolves every eligible placeholder of a string in one left-to-right pass.

use stencil_domain::delimiter::DelimiterSpec;
use stencil_domain::lookup::Lookup;
use stencil_domain::placeholder::{PlaceholderSpan, ResolvedKey};
use tracing::{debug, trace};

use super::scanner::{Scanner, Segment};

/// A placeholder that received a replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlaceholder {
    /// Raw key as written between the delimiters.
    pub key: String,

    /// The replacement text.
    pub value: String,

    /// Whether the inline default was used instead of a looked-up value.
    pub used_fallback: bool,
}

/// Result of substitution for a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// The transformed text.
    pub output: String,

    /// Placeholders that were replaced.
    pub resolved: Vec<ResolvedPlaceholder>,

    /// Lookup keys with no value and no default; their placeholders were kept.
    pub unresolved: Vec<String>,

    /// Raw keys outside the scope; their placeholders were kept.
    pub out_of_scope: Vec<String>,

    /// Number of escaped placeholders copied through.
    pub escaped: usize,
}

impl SubstitutionReport {
    /// Creates a report for input with no placeholders.
    #[must_use]
    pub fn unchanged(input: &str) -> Self {
        Self {
            output: input.to_string(),
            ..Self::default()
        }
    }

    /// Returns true if no eligible placeholder was left unresolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Returns the count of replaced placeholders.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    /// Returns the count of unresolved placeholders.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

/// Outcome for one non-escaped span.
enum Resolution {
    Value(String),
    Fallback(String),
    Unresolved(String),
    OutOfScope,
}

/// The placeholder substitution engine.
///
/// Holds no mutable state: a `Substitutor` can be shared between threads
/// whenever its lookup can.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use stencil_application::substitutor::Substitutor;
/// use stencil_domain::delimiter::DelimiterSpec;
///
/// let store = HashMap::from([("x".to_string(), "Y".to_string())]);
/// let substitutor = Substitutor::new(DelimiterSpec::dollar_brace(), store);
///
/// assert_eq!(substitutor.replace(Some("a ${x} b")), Some("a Y b".to_string()));
/// assert_eq!(substitutor.replace(None), None);
/// ```
#[derive(Debug, Clone)]
pub struct Substitutor<L> {
    spec: DelimiterSpec,
    lookup: L,
}

impl<L: Lookup> Substitutor<L> {
    /// Creates a substitutor bound to a lookup.
    #[must_use]
    pub const fn new(spec: DelimiterSpec, lookup: L) -> Self {
        Self { spec, lookup }
    }

    /// Returns the delimiter configuration.
    #[must_use]
    pub const fn spec(&self) -> &DelimiterSpec {
        &self.spec
    }

    /// Returns the bound lookup.
    #[must_use]
    pub const fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Replaces every eligible placeholder; absent input stays absent.
    #[must_use]
    pub fn replace(&self, text: Option<&str>) -> Option<String> {
        text.map(|text| self.replace_str(text))
    }

    /// Replaces every eligible placeholder in `text`.
    #[must_use]
    pub fn replace_str(&self, text: &str) -> String {
        self.substitute(text).output
    }

    /// Replaces every eligible placeholder and reports what happened.
    ///
    /// Replacement values are never rescanned.
    #[must_use]
    pub fn substitute(&self, text: &str) -> SubstitutionReport {
        if self.spec.find_open(text, 0).is_none() {
            return SubstitutionReport::unchanged(text);
        }

        let mut report = SubstitutionReport {
            output: String::with_capacity(text.len()),
            ..SubstitutionReport::default()
        };

        for segment in Scanner::new(&self.spec, text) {
            match segment {
                Segment::Literal(literal) => report.output.push_str(literal),
                Segment::Escaped(span) => {
                    trace!(key = %span.raw_key, "escaped placeholder");
                    report.output.push_str(span.source(text));
                    report.escaped += 1;
                }
                Segment::Placeholder(span) => self.apply(&span, text, &mut report),
            }
        }

        debug!(
            resolved = report.resolved_count(),
            unresolved = report.unresolved_count(),
            out_of_scope = report.out_of_scope.len(),
            escaped = report.escaped,
            "substitution finished"
        );

        report
    }

    fn apply(&self, span: &PlaceholderSpan, text: &str, report: &mut SubstitutionReport) {
        match self.resolve(&span.raw_key) {
            Resolution::Value(value) => {
                trace!(key = %span.raw_key, "placeholder resolved");
                report.output.push_str(&value);
                report.resolved.push(ResolvedPlaceholder {
                    key: span.raw_key.clone(),
                    value,
                    used_fallback: false,
                });
            }
            Resolution::Fallback(value) => {
                trace!(key = %span.raw_key, "placeholder resolved to default");
                report.output.push_str(&value);
                report.resolved.push(ResolvedPlaceholder {
                    key: span.raw_key.clone(),
                    value,
                    used_fallback: true,
                });
            }
            Resolution::Unresolved(key) => {
                trace!(key = %key, "placeholder has no value");
                report.output.push_str(span.source(text));
                report.unresolved.push(key);
            }
            Resolution::OutOfScope => {
                trace!(key = %span.raw_key, scope = %self.spec.scope(), "placeholder out of scope");
                report.output.push_str(span.source(text));
                report.out_of_scope.push(span.raw_key.clone());
            }
        }
    }

    fn resolve(&self, raw_key: &str) -> Resolution {
        let Some(key) = ResolvedKey::parse(raw_key, self.spec.scope()) else {
            return Resolution::OutOfScope;
        };

        match (self.lookup.lookup(&key.lookup_key), key.fallback) {
            (Some(value), _) => Resolution::Value(value),
            (None, Some(fallback)) => Resolution::Fallback(fallback),
            (None, None) => Resolution::Unresolved(key.lookup_key),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stencil_domain::lookup::from_fn;

    fn create_test_store() -> HashMap<String, String> {
        [
            ("place_holder", "P_L_A_C_E_H_O_L_D_E_R"),
            ("complex", "C_O_M_P_L_E_X"),
            ("one", "O_N_E"),
            ("two", "T_W_O"),
            ("escape", "E_S_C_A_P_E"),
            ("three", "3"),
            ("START", "begin"),
            ("STOP", "end"),
            (".record.user{age > 40}", "a_user"),
            (".record.user${age > 40}$", "another_user"),
            (".aaa.bbb", "ok"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn substitutor(open: &str, close: &str, scope: &str) -> Substitutor<HashMap<String, String>> {
        let spec = DelimiterSpec::new(open, close, scope).unwrap();
        Substitutor::new(spec, create_test_store())
    }

    #[test]
    fn test_substitution_table() {
        let cases: &[(&str, &str, &str, Option<&str>, Option<&str>)] = &[
            (
                "${",
                "}",
                "",
                Some("No placeholder in the sentence."),
                Some("No placeholder in the sentence."),
            ),
            (
                "${",
                "}",
                "",
                Some("This is a simple ${place_holder}."),
                Some("This is a simple P_L_A_C_E_H_O_L_D_E_R."),
            ),
            (
                "((",
                "))",
                "",
                Some("A more ((complex)) example with ((two)) place holders."),
                Some("A more C_O_M_P_L_E_X example with T_W_O place holders."),
            ),
            (
                "${",
                "}",
                "",
                Some(r"Example ${three} with \${escape} ${place_holder}."),
                Some("Example 3 with ${escape} P_L_A_C_E_H_O_L_D_E_R."),
            ),
            (
                "[",
                "]",
                "",
                Some("[one] key with [unknown:-MY_DEFAULT] value"),
                Some("O_N_E key with MY_DEFAULT value"),
            ),
            ("${", "}", "", Some("${one} ${two} ${three}"), Some("O_N_E T_W_O 3")),
            ("${", "}", "", Some("${aaa:-AAA} ${bbb:-BBB} ${ccc:-CCC}"), Some("AAA BBB CCC")),
            (
                "[START[",
                "]STOP]",
                "",
                Some("[START[START]STOP] [START[STOP]STOP]"),
                Some("begin end"),
            ),
            ("[[", "]]", "", Some("[[START]] [[STOP]]"), Some("begin end")),
            (
                "[[",
                "]]",
                "",
                Some("example without substitution"),
                Some("example without substitution"),
            ),
            (
                "{",
                "}",
                "",
                Some("This is dssl {.record.user{age > 40}}"),
                Some("This is dssl a_user"),
            ),
            (
                "${",
                "}$",
                "",
                Some("This is dssl ${.record.user{age > 40}}$"),
                Some("This is dssl a_user"),
            ),
            (
                "${",
                "}$",
                "",
                Some("This is dssl ${.record.user${age > 40}$}$"),
                Some("This is dssl another_user"),
            ),
            (
                "${",
                "}$",
                "",
                Some("This is dssl ${.record.user${age > 40}$}$ end."),
                Some("This is dssl another_user end."),
            ),
            (
                "${",
                "}$",
                ".input",
                Some("This is dssl ${.input.record.user${age > 40}$}$ end."),
                Some("This is dssl another_user end."),
            ),
            (
                "{",
                "}",
                ".input",
                Some("This is dssl {.input.record.user{age > 40}} end."),
                Some("This is dssl a_user end."),
            ),
            (
                "{",
                "}",
                ".input",
                Some("This is dssl {.input.record.xuserx{age > 40}:-no_user} end."),
                Some("This is dssl no_user end."),
            ),
            ("${", "}$", "", Some("a"), Some("a")),
            ("${", "}$", "", None, None),
            (
                "{",
                "}",
                ".response",
                Some("This is an input {.input.aaa.bbb} and a response {.response.aaa.bbb}."),
                Some("This is an input {.input.aaa.bbb} and a response ok."),
            ),
        ];

        for (open, close, scope, input, expected) in cases {
            let result = substitutor(open, close, scope).replace(*input);
            assert_eq!(
                result.as_deref(),
                *expected,
                "open={open:?} close={close:?} scope={scope:?} input={input:?}"
            );
        }
    }

    #[test]
    fn test_identity_without_open_token() {
        let s = substitutor("${", "}", "");
        let input = "no tokens } here {";
        assert_eq!(s.replace_str(input), input);
    }

    #[test]
    fn test_simple_substitution() {
        let store = HashMap::from([("x".to_string(), "Y".to_string())]);
        let s = Substitutor::new(DelimiterSpec::dollar_brace(), store);
        assert_eq!(s.replace_str("a ${x} b"), "a Y b");
    }

    #[test]
    fn test_escaped_placeholder_is_not_looked_up() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lookup = from_fn(move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("V".to_string())
        });
        let s = Substitutor::new(DelimiterSpec::dollar_brace(), lookup);

        assert_eq!(s.replace_str(r"a \${x} b"), "a ${x} b");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_escaped_placeholder_ignores_scope() {
        let s = substitutor("{", "}", ".response");
        assert_eq!(s.replace_str(r"\{.input.x}"), "{.input.x}");
    }

    #[test]
    fn test_double_backslash_keeps_one_marker() {
        let s = substitutor("${", "}", "");
        assert_eq!(s.replace_str(r"\\${one}"), r"\${one}");
    }

    #[test]
    fn test_backslash_before_close_has_no_effect() {
        let s = substitutor("${", "}", "");
        assert_eq!(s.replace_str(r"${one\}"), r"${one\}");
        assert_eq!(s.replace_str(r"${one}\}"), r"O_N_E\}");
    }

    #[test]
    fn test_default_fallback() {
        let s = substitutor("[", "]", "");
        assert_eq!(s.replace_str("[k:-D]"), "D");
    }

    #[test]
    fn test_lookup_value_wins_over_default() {
        let s = substitutor("${", "}", "");
        assert_eq!(s.replace_str("${one:-fallback}"), "O_N_E");
    }

    #[test]
    fn test_empty_default() {
        let s = substitutor("${", "}", "");
        assert_eq!(s.replace_str("[${missing:-}]"), "[]");
    }

    #[test]
    fn test_nested_same_character_delimiters() {
        let store = HashMap::from([(".a{b}".to_string(), "V".to_string())]);
        let s = Substitutor::new(DelimiterSpec::braces(), store);
        assert_eq!(s.replace_str("{.a{b}}"), "V");
    }

    #[test]
    fn test_scope_filtering() {
        let store = HashMap::from([(".aaa".to_string(), "ok".to_string())]);
        let s = Substitutor::new(DelimiterSpec::braces().with_scope(".response"), store);
        assert_eq!(
            s.replace_str("{.input.aaa} {.response.aaa}"),
            "{.input.aaa} ok"
        );
    }

    #[test]
    fn test_missing_value_is_kept_literally() {
        let s = substitutor("${", "}", "");
        assert_eq!(s.replace_str("a ${missing} b"), "a ${missing} b");
    }

    #[test]
    fn test_unmatched_open_round_trips() {
        let s = substitutor("${", "}", "");
        assert_eq!(s.replace_str("text ${unterminated"), "text ${unterminated");
    }

    #[test]
    fn test_empty_key_passes_through() {
        let s = substitutor("${", "}", "");
        assert_eq!(s.replace_str("${}"), "${}");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let store = HashMap::from([
            ("a".to_string(), "${b}".to_string()),
            ("b".to_string(), "nope".to_string()),
        ]);
        let s = Substitutor::new(DelimiterSpec::dollar_brace(), store);
        assert_eq!(s.replace_str("${a}"), "${b}");
    }

    #[test]
    fn test_idempotent_on_resolved_output() {
        let s = substitutor("${", "}", "");
        let once = s.replace_str("${one} and ${two}");
        assert_eq!(s.replace_str(&once), once);
    }

    #[test]
    fn test_lookup_called_once_per_span() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lookup = from_fn(move |key: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            (key == "x").then(|| "1".to_string())
        });
        let s = Substitutor::new(DelimiterSpec::dollar_brace().with_scope("."), lookup);

        let _ = s.replace_str("${.x} ${.x} ${.y} ${out}");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_report_counts() {
        let s = substitutor("{", "}", ".input");
        let template = r"{.input.three:-x} {.input.nope:-d} {.input.gone} {.other} \{.input.one}";
        let report = s.substitute(template);

        assert_eq!(
            report.output,
            r"x d {.input.gone} {.other} {.input.one}"
        );
        assert_eq!(report.resolved_count(), 2);
        assert!(report.resolved.iter().all(|r| r.used_fallback));
        assert_eq!(report.unresolved, vec![".gone"]);
        assert_eq!(report.out_of_scope, vec![".other"]);
        assert_eq!(report.escaped, 1);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_for_plain_text() {
        let s = substitutor("${", "}", "");
        let report = s.substitute("nothing here");
        assert_eq!(report, SubstitutionReport::unchanged("nothing here"));
        assert!(report.is_complete());
    }

    #[test]
    fn test_shared_across_threads() {
        let s = Arc::new(substitutor("${", "}", ""));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = Arc::clone(&s);
                std::thread::spawn(move || s.replace_str("${one}-${two}"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "O_N_E-T_W_O");
        }
    }
}
