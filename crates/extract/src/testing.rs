//! Hand-annotated sentence fixtures.

use crate::doc::{AnnotatedSentence, EntitySpan, NounChunk, Pos, Token};

#[derive(Default)]
pub(crate) struct SentenceBuilder {
    doc: AnnotatedSentence,
}

impl SentenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token. The lemma defaults to the lowercased text.
    pub fn token(mut self, text: &str, pos: Pos, tag: &str, head: usize) -> Self {
        let index = self.doc.tokens.len();
        self.doc.tokens.push(Token {
            index,
            text: text.to_string(),
            whitespace: " ".to_string(),
            lemma: text.to_lowercase(),
            pos,
            tag: tag.to_string(),
            is_punct: pos == Pos::Punct,
            head,
        });
        self
    }

    /// Override the lemma of the last token.
    pub fn lemma(mut self, lemma: &str) -> Self {
        if let Some(token) = self.doc.tokens.last_mut() {
            token.lemma = lemma.to_string();
        }
        self
    }

    /// The last token is directly followed by the next one.
    pub fn no_space(mut self) -> Self {
        if let Some(token) = self.doc.tokens.last_mut() {
            token.whitespace.clear();
        }
        self
    }

    pub fn ent(mut self, start: usize, end: usize, label: &str) -> Self {
        self.doc.ents.push(EntitySpan {
            start,
            end,
            label: label.to_string(),
        });
        self
    }

    pub fn chunk(mut self, start: usize, end: usize) -> Self {
        self.doc.noun_chunks.push(NounChunk { start, end });
        self
    }

    pub fn build(self) -> AnnotatedSentence {
        self.doc
    }
}

/// "U.S. Treasury Secretary Steven Mnuchin said on Saturday that Washington
/// wants to include a provision."
pub(crate) fn mnuchin() -> AnnotatedSentence {
    SentenceBuilder::new()
        .token("U.S.", Pos::Propn, "NNP", 2)
        .token("Treasury", Pos::Propn, "NNP", 2)
        .token("Secretary", Pos::Propn, "NNP", 4)
        .token("Steven", Pos::Propn, "NNP", 4)
        .token("Mnuchin", Pos::Propn, "NNP", 5)
        .token("said", Pos::Verb, "VBD", 5)
        .lemma("say")
        .token("on", Pos::Adp, "IN", 5)
        .token("Saturday", Pos::Propn, "NNP", 6)
        .token("that", Pos::Sconj, "IN", 10)
        .token("Washington", Pos::Propn, "NNP", 10)
        .token("wants", Pos::Verb, "VBZ", 5)
        .lemma("want")
        .token("to", Pos::Part, "TO", 12)
        .token("include", Pos::Verb, "VB", 10)
        .token("a", Pos::Det, "DT", 14)
        .token("provision", Pos::Noun, "NN", 12)
        .no_space()
        .token(".", Pos::Punct, ".", 5)
        .ent(3, 5, "PERSON")
        .ent(7, 8, "DATE")
        .ent(9, 10, "GPE")
        .chunk(0, 5)
        .chunk(7, 8)
        .chunk(9, 10)
        .chunk(13, 15)
        .build()
}

/// "Yana Pechenik, a physician assistant at MyBotoxLA, said the treatment
/// works."
pub(crate) fn pechenik() -> AnnotatedSentence {
    SentenceBuilder::new()
        .token("Yana", Pos::Propn, "NNP", 1)
        .token("Pechenik", Pos::Propn, "NNP", 9)
        .no_space()
        .token(",", Pos::Punct, ",", 1)
        .token("a", Pos::Det, "DT", 5)
        .token("physician", Pos::Noun, "NN", 5)
        .token("assistant", Pos::Noun, "NN", 1)
        .token("at", Pos::Adp, "IN", 5)
        .token("MyBotoxLA", Pos::Propn, "NNP", 6)
        .no_space()
        .token(",", Pos::Punct, ",", 1)
        .token("said", Pos::Verb, "VBD", 9)
        .lemma("say")
        .token("the", Pos::Det, "DT", 11)
        .token("treatment", Pos::Noun, "NN", 12)
        .token("works", Pos::Verb, "VBZ", 9)
        .lemma("work")
        .no_space()
        .token(".", Pos::Punct, ".", 9)
        .ent(0, 2, "PERSON")
        .ent(7, 8, "ORG")
        .chunk(0, 2)
        .chunk(3, 6)
        .chunk(7, 8)
        .chunk(10, 12)
        .build()
}

/// "Justin Williams is a <modifiers> Canadian-American professional ice
/// hockey right winger." The extra modifiers lengthen the predicate chunk.
pub(crate) fn williams(modifiers: &[&str]) -> AnnotatedSentence {
    let shift = modifiers.len();
    let winger = 11 + shift;

    let mut builder = SentenceBuilder::new()
        .token("Justin", Pos::Propn, "NNP", 1)
        .token("Williams", Pos::Propn, "NNP", 2)
        .token("is", Pos::Aux, "VBZ", 2)
        .lemma("be")
        .token("a", Pos::Det, "DT", winger);
    for modifier in modifiers {
        builder = builder.token(modifier, Pos::Adj, "JJ", winger);
    }
    builder
        .token("Canadian", Pos::Adj, "JJ", 6 + shift)
        .no_space()
        .token("-", Pos::Punct, "HYPH", 6 + shift)
        .no_space()
        .token("American", Pos::Adj, "JJ", winger)
        .token("professional", Pos::Adj, "JJ", winger)
        .token("ice", Pos::Noun, "NN", 9 + shift)
        .token("hockey", Pos::Noun, "NN", winger)
        .token("right", Pos::Adj, "JJ", winger)
        .token("winger", Pos::Noun, "NN", 2)
        .no_space()
        .token(".", Pos::Punct, ".", 2)
        .ent(0, 2, "PERSON")
        .ent(4 + shift, 7 + shift, "NORP")
        .chunk(0, 2)
        .chunk(3, winger + 1)
        .build()
}

/// "Nebraska head coach Tim Miles greets fans." The title sits in its own
/// chunk directly before the name.
pub(crate) fn miles() -> AnnotatedSentence {
    SentenceBuilder::new()
        .token("Nebraska", Pos::Propn, "NNP", 2)
        .token("head", Pos::Noun, "NN", 2)
        .token("coach", Pos::Noun, "NN", 4)
        .token("Tim", Pos::Propn, "NNP", 4)
        .token("Miles", Pos::Propn, "NNP", 5)
        .token("greets", Pos::Verb, "VBZ", 5)
        .lemma("greet")
        .token("fans", Pos::Noun, "NNS", 5)
        .no_space()
        .token(".", Pos::Punct, ".", 5)
        .ent(0, 1, "GPE")
        .ent(3, 5, "PERSON")
        .chunk(0, 3)
        .chunk(3, 5)
        .chunk(6, 7)
        .build()
}

/// "The sky is blue."
pub(crate) fn sky() -> AnnotatedSentence {
    SentenceBuilder::new()
        .token("The", Pos::Det, "DT", 1)
        .token("sky", Pos::Noun, "NN", 2)
        .token("is", Pos::Aux, "VBZ", 2)
        .lemma("be")
        .token("blue", Pos::Adj, "JJ", 2)
        .no_space()
        .token(".", Pos::Punct, ".", 2)
        .chunk(0, 2)
        .build()
}
