use std::fs;
use std::path::Path;

use anyhow::Result;

const WORD_LIST: &str = include_str!("../../assets/word_list.json");

/// Candidate words for wrong answers.
#[derive(Clone, Debug, Default)]
pub struct DistractorPool {
    words: Vec<String>,
}

impl DistractorPool {
    /// The bundled general word list.
    pub fn builtin() -> Self {
        let words: Vec<String> = serde_json::from_str(WORD_LIST).unwrap_or_default();
        Self::from_words(words)
    }

    /// Load a JSON array of words from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let words: Vec<String> = serde_json::from_str(&content)?;
        Ok(Self::from_words(words))
    }

    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let words = words
            .into_iter()
            .map(|w| w.into().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
