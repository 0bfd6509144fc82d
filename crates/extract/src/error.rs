use thiserror::Error;

/// Structural problems in an engine response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSentence {
    #[error("token at position {position} reports index {index}")]
    TokenOrder { position: usize, index: usize },

    #[error("token {token} has head {head} outside a {len}-token sentence")]
    HeadOutOfRange { token: usize, head: usize, len: usize },

    #[error("span [{start}, {end}) is outside a {len}-token sentence")]
    SpanOutOfRange { start: usize, end: usize, len: usize },
}

/// Failures talking to the annotation engine over HTTP.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to reach annotation engine")]
    Transport(#[source] reqwest::Error),

    #[error("annotation engine answered HTTP {0}")]
    Status(u16),

    #[error("failed to decode annotation response")]
    Decode(#[source] reqwest::Error),
}

impl EngineError {
    /// Transport failures and 5xx answers may clear up on their own; a 4xx
    /// or an undecodable body fails the same way every time.
    pub fn is_transient(&self) -> bool {
        match self {
            EngineError::Transport(_) => true,
            EngineError::Status(code) => (500..600).contains(code),
            EngineError::Decode(_) => false,
        }
    }
}

/// Failures of the annotation step. "No person" and "no title" are not
/// errors; they come back as unset fields of an `Extraction`.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("annotation engine failed: {0:#}")]
    Annotation(anyhow::Error),

    #[error("annotation engine returned a malformed sentence: {0}")]
    InvalidSentence(#[from] InvalidSentence),
}
