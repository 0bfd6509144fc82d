//! Title span selection.
//!
//! Three strategies are tried in a fixed order and the first one that yields
//! a span wins:
//!
//! 1. [`TitleMethod::NounChunkBefore`]: a prenominal title sharing a noun
//!    chunk with the name ("U.S. Treasury Secretary Steven Mnuchin").
//! 2. [`TitleMethod::DependencySubtree`]: an appositive hanging off the
//!    name ("Yana Pechenik, a physician assistant at MyBotoxLA, said ...").
//! 3. [`TitleMethod::NounChunkSearch`]: a dictionary-gated noun chunk,
//!    typically a copular predicate ("Justin Williams is a ... winger").

use serde::Serialize;

use crate::cleanup::{error_check, trim_det_punct};
use crate::dictionary::TitleDictionary;
use crate::doc::{AnnotatedSentence, Span};

const COPULA_LEMMA: &str = "be";
const COMMA: &str = ",";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleMethod {
    NounChunkBefore,
    DependencySubtree,
    NounChunkSearch,
}

impl TitleMethod {
    /// Order in which the strategies are attempted.
    pub const ORDER: [TitleMethod; 3] = [
        TitleMethod::NounChunkBefore,
        TitleMethod::DependencySubtree,
        TitleMethod::NounChunkSearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleMethod::NounChunkBefore => "noun_chunk_before",
            TitleMethod::DependencySubtree => "dependency_subtree",
            TitleMethod::NounChunkSearch => "noun_chunk_search",
        }
    }

    /// Run this strategy for the given person span.
    pub fn select(
        &self,
        doc: &AnnotatedSentence,
        person: Span,
        dictionary: &TitleDictionary,
    ) -> Option<Span> {
        if person.is_empty() || person.end > doc.len() {
            return None;
        }

        let span = match self {
            TitleMethod::NounChunkBefore => noun_chunk_before(doc, person),
            TitleMethod::DependencySubtree => dependency_subtree(doc, person),
            TitleMethod::NounChunkSearch => noun_chunk_search(doc, person, dictionary),
        };

        tracing::debug!(
            method = self.as_str(),
            span = ?span,
            text = %span.map(|s| doc.text(s)).unwrap_or_default(),
            "Title strategy attempted"
        );

        span.filter(|s| !s.is_empty())
    }
}

/// Try every strategy in order and report the first hit.
pub fn select_title(
    doc: &AnnotatedSentence,
    person: Span,
    dictionary: &TitleDictionary,
) -> Option<(TitleMethod, Span)> {
    TitleMethod::ORDER
        .into_iter()
        .find_map(|method| method.select(doc, person, dictionary).map(|span| (method, span)))
}

/// The first chunk that starts before the name and reaches its end; the
/// title is the part of the chunk in front of the name.
fn noun_chunk_before(doc: &AnnotatedSentence, person: Span) -> Option<Span> {
    let chunk = doc
        .noun_chunks
        .iter()
        .find(|chunk| chunk.start < person.start && chunk.end >= person.end)?;

    error_check(doc, Span::new(chunk.start, person.start))
}

/// Only handles the "Name, title" insertion: the subtree rooted at the last
/// name token must be gap-free, start with the name and continue with a
/// comma.
fn dependency_subtree(doc: &AnnotatedSentence, person: Span) -> Option<Span> {
    let subtree = doc.subtree(person.last());
    if !subtree.is_contiguous() || subtree.start != person.start {
        return None;
    }

    let candidate = Span::new(person.end, subtree.end + 1);
    if candidate.is_empty() {
        return None;
    }

    let first = doc.token(candidate.start);
    if !(first.is_punct && first.lemma == COMMA) {
        return None;
    }

    Some(trim_det_punct(doc, candidate)).filter(|span| !span.is_empty())
}

/// Among chunks headed by a known title word, pick the predicate of a
/// copula whose subject is the name, or a chunk ending exactly where the name
/// starts. The last qualifying chunk wins.
fn noun_chunk_search(
    doc: &AnnotatedSentence,
    person: Span,
    dictionary: &TitleDictionary,
) -> Option<Span> {
    let ancestor = doc.token(person.last()).head;
    let ancestor_is_copula = doc.token(ancestor).lemma == COPULA_LEMMA;

    let mut selected = None;
    let candidates = doc
        .noun_chunks
        .iter()
        .filter(|chunk| chunk.end > chunk.start)
        .filter(|chunk| dictionary.contains(&doc.token(chunk.end - 1).text));

    for chunk in candidates {
        let shares_copula = doc.token(chunk.end - 1).head == ancestor && ancestor_is_copula;
        if shares_copula || chunk.end == person.start {
            selected = Some(chunk.span());
        }
    }

    let span = error_check(doc, selected?)?;
    Some(trim_det_punct(doc, span))
}
