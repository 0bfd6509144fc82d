//! Boundary cleanup shared by the title strategies.

use regex::Regex;
use std::sync::LazyLock;

use crate::doc::{AnnotatedSentence, Span};

/// Longer candidates are treated as parse errors rather than titles.
pub const MAX_TITLE_TOKENS: usize = 10;

static LEADING_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s“”]+").expect("valid regex"));
static TRAILING_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s“”]+$").expect("valid regex"));

/// Sanity check for a raw candidate span.
///
/// A candidate opening with punctuation usually comes from a mis-parse such
/// as "(left) greets Nebraska coach Tim Miles": everything up to and
/// including the last verb is dropped. Empty or over-long spans are rejected.
pub fn error_check(doc: &AnnotatedSentence, span: Span) -> Option<Span> {
    let mut span = span;

    if !span.is_empty() && doc.token(span.start).is_punct {
        let last_verb = doc
            .slice(span)
            .iter()
            .rposition(|token| token.is_verb());
        if let Some(offset) = last_verb {
            span.start += offset + 1;
        }
    }

    if span.is_empty() || span.len() > MAX_TITLE_TOKENS {
        tracing::debug!(
            start = span.start,
            end = span.end,
            "Rejected title candidate by length"
        );
        return None;
    }

    Some(span)
}

/// Strip determiners and punctuation from the left edge and punctuation from
/// the right edge. When the walk would leave a single token or nothing, the
/// span is returned untouched.
pub fn trim_det_punct(doc: &AnnotatedSentence, span: Span) -> Span {
    if span.is_empty() {
        return span;
    }

    let mut i = span.start;
    let mut j = span.last();
    while i < j {
        if doc.token(i).is_punct || doc.token(i).is_determiner() {
            i += 1;
        } else if doc.token(j).is_punct {
            j -= 1;
        } else {
            break;
        }
    }

    if j > i { Span::new(i, j + 1) } else { span }
}

/// Remove whitespace and curly quotes from both ends of a rendered title.
pub fn post_process(title: &str) -> String {
    let title = LEADING_JUNK.replace(title, "");
    TRAILING_JUNK.replace(&title, "").into_owned()
}
