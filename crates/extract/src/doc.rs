use serde::{Deserialize, Serialize};

use crate::error::InvalidSentence;

/// Universal coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Space,
    Sym,
    Verb,
    X,
}

impl Pos {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pos::Adj => "ADJ",
            Pos::Adp => "ADP",
            Pos::Adv => "ADV",
            Pos::Aux => "AUX",
            Pos::Cconj => "CCONJ",
            Pos::Det => "DET",
            Pos::Intj => "INTJ",
            Pos::Noun => "NOUN",
            Pos::Num => "NUM",
            Pos::Part => "PART",
            Pos::Pron => "PRON",
            Pos::Propn => "PROPN",
            Pos::Punct => "PUNCT",
            Pos::Sconj => "SCONJ",
            Pos::Space => "SPACE",
            Pos::Sym => "SYM",
            Pos::Verb => "VERB",
            Pos::X => "X",
        }
    }
}

impl From<&str> for Pos {
    fn from(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "ADJ" => Pos::Adj,
            "ADP" => Pos::Adp,
            "ADV" => Pos::Adv,
            "AUX" => Pos::Aux,
            // older engines still emit CONJ
            "CCONJ" | "CONJ" => Pos::Cconj,
            "DET" => Pos::Det,
            "INTJ" => Pos::Intj,
            "NOUN" => Pos::Noun,
            "NUM" => Pos::Num,
            "PART" => Pos::Part,
            "PRON" => Pos::Pron,
            "PROPN" => Pos::Propn,
            "PUNCT" => Pos::Punct,
            "SCONJ" => Pos::Sconj,
            "SPACE" => Pos::Space,
            "SYM" => Pos::Sym,
            "VERB" => Pos::Verb,
            _ => Pos::X,
        }
    }
}

impl From<String> for Pos {
    fn from(tag: String) -> Self {
        Pos::from(tag.as_str())
    }
}

impl From<Pos> for String {
    fn from(pos: Pos) -> Self {
        pos.as_str().to_string()
    }
}

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the sentence.
    pub index: usize,
    pub text: String,
    /// Whitespace that followed the token in the raw text.
    #[serde(default)]
    pub whitespace: String,
    pub lemma: String,
    pub pos: Pos,
    /// Fine-grained (Penn Treebank) tag.
    #[serde(default)]
    pub tag: String,
    pub is_punct: bool,
    /// Index of the dependency head. A root points at itself.
    pub head: usize,
}

impl Token {
    pub fn is_determiner(&self) -> bool {
        self.tag == "DT"
    }

    pub fn is_verb(&self) -> bool {
        self.pos == Pos::Verb
    }
}

/// Half-open token range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the last token. Only meaningful for non-empty spans.
    pub fn last(&self) -> usize {
        self.end - 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl EntitySpan {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Noun phrase reported by the engine. Its head is the last token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounChunk {
    pub start: usize,
    pub end: usize,
}

impl NounChunk {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Extent of a token's dependency subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subtree {
    /// Leftmost token index.
    pub start: usize,
    /// Rightmost token index (inclusive).
    pub end: usize,
    /// Number of tokens in the subtree.
    pub count: usize,
}

impl Subtree {
    /// True when the subtree has no gaps.
    pub fn is_contiguous(&self) -> bool {
        self.end - self.start + 1 == self.count
    }
}

/// A sentence as returned by the annotation engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub ents: Vec<EntitySpan>,
    #[serde(default)]
    pub noun_chunks: Vec<NounChunk>,
}

impl AnnotatedSentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, index: usize) -> &Token {
        &self.tokens[index]
    }

    /// The dependency head of the token at `index`.
    pub fn head_of(&self, index: usize) -> &Token {
        &self.tokens[self.tokens[index].head]
    }

    pub fn slice(&self, span: Span) -> &[Token] {
        &self.tokens[span.start..span.end]
    }

    /// Render a span as it appeared in the raw text, without the trailing
    /// whitespace of its last token.
    pub fn text(&self, span: Span) -> String {
        let tokens = self.slice(span);
        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            out.push_str(&token.text);
            if i + 1 < tokens.len() {
                out.push_str(&token.whitespace);
            }
        }
        out
    }

    /// Subtree of the token at `index`: the token itself plus every token
    /// whose chain of heads reaches it.
    pub fn subtree(&self, index: usize) -> Subtree {
        let children = self.children();
        let mut visited = vec![false; self.tokens.len()];
        let mut stack = vec![index];
        let mut start = index;
        let mut end = index;
        let mut count = 0;

        // visited guards against cycles in a malformed parse
        while let Some(token) = stack.pop() {
            if std::mem::replace(&mut visited[token], true) {
                continue;
            }
            start = start.min(token);
            end = end.max(token);
            count += 1;
            stack.extend(&children[token]);
        }

        Subtree { start, end, count }
    }

    /// Dependents of every token. Roots are not listed as their own child.
    fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.tokens.len()];
        for (index, token) in self.tokens.iter().enumerate() {
            if token.head != index && token.head < self.tokens.len() {
                children[token.head].push(index);
            }
        }
        children
    }

    /// Check the structural invariants the selector relies on.
    pub fn validate(&self) -> Result<(), InvalidSentence> {
        let len = self.tokens.len();

        for (position, token) in self.tokens.iter().enumerate() {
            if token.index != position {
                return Err(InvalidSentence::TokenOrder {
                    position,
                    index: token.index,
                });
            }
            if token.head >= len {
                return Err(InvalidSentence::HeadOutOfRange {
                    token: position,
                    head: token.head,
                    len,
                });
            }
        }

        let spans = self
            .ents
            .iter()
            .map(EntitySpan::span)
            .chain(self.noun_chunks.iter().map(NounChunk::span));
        for span in spans {
            if span.start > span.end || span.end > len {
                return Err(InvalidSentence::SpanOutOfRange {
                    start: span.start,
                    end: span.end,
                    len,
                });
            }
        }

        Ok(())
    }
}
