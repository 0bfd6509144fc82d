use crate::doc::{AnnotatedSentence, Span};

pub const PERSON_LABEL: &str = "PERSON";

/// A person mention found among the entity spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonMention {
    pub name: String,
    pub span: Span,
}

/// Find the person the sentence is about.
///
/// Every PERSON span overwrites the previous one, so the last mention wins.
/// Empty spans are ignored.
pub fn locate_person(doc: &AnnotatedSentence) -> Option<PersonMention> {
    let mut found = None;

    for ent in &doc.ents {
        let span = ent.span();
        if ent.label == PERSON_LABEL && !span.is_empty() {
            found = Some(PersonMention {
                name: doc.text(span),
                span,
            });
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Pos;
    use crate::testing::{self, SentenceBuilder};

    #[test]
    fn test_locates_person() {
        let person = locate_person(&testing::mnuchin()).unwrap();
        assert_eq!(person.name, "Steven Mnuchin");
        assert_eq!(person.span, Span::new(3, 5));
    }

    #[test]
    fn test_no_person() {
        assert_eq!(locate_person(&testing::sky()), None);
    }

    #[test]
    fn test_last_person_wins() {
        // Alice met Bob Jones .
        let doc = SentenceBuilder::new()
            .token("Alice", Pos::Propn, "NNP", 1)
            .token("met", Pos::Verb, "VBD", 1)
            .token("Bob", Pos::Propn, "NNP", 3)
            .token("Jones", Pos::Propn, "NNP", 1)
            .no_space()
            .token(".", Pos::Punct, ".", 1)
            .ent(0, 1, "PERSON")
            .ent(2, 4, "PERSON")
            .build();

        let person = locate_person(&doc).unwrap();
        assert_eq!(person.name, "Bob Jones");
        assert_eq!(person.span, Span::new(2, 4));
    }

    #[test]
    fn test_ignores_other_labels() {
        let person = locate_person(&testing::miles()).unwrap();
        assert_eq!(person.name, "Tim Miles");
    }
}
