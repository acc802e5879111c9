pub mod catalog;
pub mod model;

pub use catalog::{generic_word, Catalog};
pub use model::{
    Conjugation, DialogueLine, Gender, Grammar, Scenario, TranslationLang, Word, WordType,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("invalid content data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line} references unknown word '{word}'")]
    UnknownWord { line: String, word: String },

    #[error("duplicate lexicon id '{0}'")]
    DuplicateWord(String),

    #[error("scenario '{0}' has no dialogue lines")]
    EmptyScenario(String),
}
