use crate::content::Word;
use serde::{Deserialize, Serialize};

/// The learner's saved words, unique by id, in the order they were saved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Word>", into = "Vec<Word>")]
pub struct SavedWords {
    words: Vec<Word>,
}

impl SavedWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when a word with the same id is already saved.
    pub fn add(&mut self, word: Word) -> bool {
        if self.contains(&word.id) {
            return false;
        }
        self.words.push(word);
        true
    }

    /// Returns false when nothing was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| w.id != id);
        self.words.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.words.iter().any(|w| w.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn list(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Case-insensitive on French and English; plain substring on Chinese.
    /// An empty or blank term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Word> {
        let term = term.trim();
        if term.is_empty() {
            return self.words.iter().collect();
        }
        let lowered = term.to_lowercase();
        self.words
            .iter()
            .filter(|w| {
                w.french.to_lowercase().contains(&lowered)
                    || w.english.to_lowercase().contains(&lowered)
                    || w.chinese.contains(term)
            })
            .collect()
    }
}

impl From<Vec<Word>> for SavedWords {
    /// Drops later duplicates so the id invariant holds for loaded data.
    fn from(words: Vec<Word>) -> Self {
        let mut saved = SavedWords::new();
        for word in words {
            saved.add(word);
        }
        saved
    }
}

impl From<SavedWords> for Vec<Word> {
    fn from(saved: SavedWords) -> Self {
        saved.words
    }
}
