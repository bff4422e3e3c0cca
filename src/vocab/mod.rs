pub mod favourites;

use serde::{Deserialize, Serialize};

/// A single word card: the word, its definition and an example sentence.
///
/// `id` is the stable identity used by the favourites collection; entries
/// coming from the learning feed use the word itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: String,
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub example: String,
}

impl VocabularyEntry {
    pub fn new(word: &str, definition: &str, example: &str) -> Self {
        Self {
            id: word.to_string(),
            word: word.to_string(),
            definition: definition.to_string(),
            example: example.to_string(),
        }
    }

    /// Case-insensitive comparison against this entry's word.
    pub fn matches_word(&self, candidate: &str) -> bool {
        words_equal(&self.word, candidate)
    }
}

pub fn words_equal(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
