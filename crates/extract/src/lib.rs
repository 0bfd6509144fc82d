pub mod annotator;
pub mod cleanup;
pub mod dictionary;
pub mod doc;
pub mod error;
pub mod person;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

pub use annotator::{Annotator, AnnotatorClient};
pub use dictionary::TitleDictionary;
pub use doc::{AnnotatedSentence, EntitySpan, NounChunk, Pos, Span, Token};
pub use error::{EngineError, ExtractError, InvalidSentence};
pub use person::{PersonMention, locate_person};
pub use selector::{TitleMethod, select_title};

use serde::Serialize;
use std::sync::Arc;

/// Outcome of one extraction. Either field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub name: Option<String>,
    pub title: Option<String>,
    /// Strategy that produced the title, if any.
    pub method: Option<TitleMethod>,
}

/// Finds a person and their title in an annotated sentence.
#[derive(Clone)]
pub struct TitleExtractor {
    dictionary: Arc<TitleDictionary>,
}

impl TitleExtractor {
    pub fn new(dictionary: Arc<TitleDictionary>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &TitleDictionary {
        &self.dictionary
    }

    /// Locate the person, then try each title strategy until one matches.
    /// Fails if the sentence does not pass [`AnnotatedSentence::validate`].
    pub fn extract(&self, doc: &AnnotatedSentence) -> Result<Extraction, InvalidSentence> {
        doc.validate()?;

        let Some(person) = locate_person(doc) else {
            return Ok(Extraction::default());
        };

        let mut extraction = Extraction {
            name: Some(person.name),
            ..Default::default()
        };

        if let Some((method, span)) = select_title(doc, person.span, &self.dictionary) {
            extraction.title = Some(cleanup::post_process(&doc.text(span)));
            extraction.method = Some(method);
        }

        Ok(extraction)
    }

    /// Annotate raw text and extract from it. Engine failures and malformed
    /// engine output are returned as errors for the caller to handle.
    pub async fn extract_text<A: Annotator>(
        &self,
        annotator: &A,
        text: &str,
    ) -> Result<Extraction, ExtractError> {
        let doc = annotator
            .annotate(text)
            .await
            .map_err(ExtractError::Annotation)?;

        Ok(self.extract(&doc)?)
    }
}
