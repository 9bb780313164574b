use std::collections::HashSet;
use std::path::Path;

use crate::alignment::tokenization::normalize_token;
use crate::error::ValidationError;

/// Reference-side words ignored during comparison (conversational filler,
/// procedural speech). Entries are normalized at load time with the same
/// rules as transcript tokens; membership checks expect normalized input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    words: HashSet<String>,
}

impl SkipSet {
    /// Parses a newline-delimited word list. Blank lines and lines starting
    /// with `#` are ignored; entries normalizing to nothing are dropped.
    pub fn parse(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(normalize_token)
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    pub fn load(path: &Path) -> Result<Self, ValidationError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::io("read skip-word list", e))?;
        Ok(Self::parse(&data))
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let words = words
            .into_iter()
            .map(normalize_token)
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.words.contains(normalized)
    }

    /// Adds every entry of `other` to this set.
    pub fn extend(&mut self, other: SkipSet) {
        self.words.extend(other.words);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
