use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

/// Set of known title-head words ("secretary", "coach", "winger", ...).
///
/// Built once at start-up and shared read-only between requests. Entries are
/// lowercased on insert and lookups lowercase their argument, so matching is
/// case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct TitleDictionary {
    words: HashSet<String>,
}

impl TitleDictionary {
    /// Parse the flat list format: one word per line, `#` starts a comment
    /// line, surrounding tabs and line breaks are stripped.
    pub fn parse(content: &str) -> Self {
        content
            .split('\n')
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.trim_matches(['\t', '\r', '\n']))
            .filter(|word| !word.is_empty())
            .collect()
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .context(format!("Failed to read title dictionary: {:?}", path))?;

        let dictionary = Self::parse(&content);
        tracing::info!(
            path = %path.display(),
            entries = dictionary.len(),
            "Loaded title dictionary"
        );
        Ok(dictionary)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TitleDictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
        }
    }
}
