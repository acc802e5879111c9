// Built-in scenarios and lexicon, embedded at compile time.

use crate::content::model::{DialogueLine, Scenario, Word};
use crate::content::ContentError;
use serde::Deserialize;
use std::collections::HashMap;

const LEXICON_JSON: &str = include_str!("data/lexicon.json");
const SCENARIOS_JSON: &str = include_str!("data/scenarios.json");

/// Elided articles and pronouns that may be glued to a looked-up word.
const ELISIONS: [&str; 12] = [
    "l'", "m'", "t'", "s'", "j'", "d'", "n'", "c'", "qu'", "jusqu'", "lorsqu'", "puisqu'",
];

/// Characters stripped from both ends of a clicked word before lookup.
const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '«', '»', '"', '“', '”', '(', ')', '…',
];

#[derive(Deserialize)]
struct LexiconEntry {
    #[serde(flatten)]
    word: Word,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLine {
    id: String,
    speaker: String,
    french: String,
    chinese: String,
    english: String,
    words: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScenario {
    id: String,
    name: String,
    name_chinese: String,
    name_english: String,
    icon: String,
    description: String,
    dialogues: Vec<RawLine>,
}

/// Lowercases, folds the typographic apostrophe and strips edge punctuation.
pub fn normalize(text: &str) -> String {
    text.trim()
        .trim_matches(|c: char| EDGE_PUNCTUATION.contains(&c) || c.is_whitespace())
        .replace('’', "'")
        .to_lowercase()
}

/// Placeholder entry for a word the lexicon does not know.
///
/// A lone punctuation mark keeps its own text rather than going blank.
pub fn generic_word(text: &str) -> Word {
    let trimmed = text.trim();
    let stripped = trimmed.trim_matches(|c: char| EDGE_PUNCTUATION.contains(&c));
    let display = if stripped.is_empty() { trimmed } else { stripped };
    let key = match normalize(text) {
        key if key.is_empty() => display.to_lowercase(),
        key => key,
    };
    Word {
        id: format!("generic-{}", key),
        french: display.to_string(),
        chinese: format!("「{}」暂无词典释义", display),
        english: format!("No dictionary entry for \"{}\" yet", display),
        phonetic: String::new(),
        example: String::new(),
        example_chinese: String::new(),
        example_english: String::new(),
        conjugation: None,
        grammar: None,
    }
}

pub struct Catalog {
    scenarios: Vec<Scenario>,
    lexicon: Vec<Word>,
    /// Normalized surface form (French plus aliases) -> lexicon position
    index: HashMap<String, usize>,
}

impl Catalog {
    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(LEXICON_JSON, SCENARIOS_JSON)
    }

    pub fn from_json(lexicon_json: &str, scenarios_json: &str) -> Result<Self, ContentError> {
        let entries: Vec<LexiconEntry> = serde_json::from_str(lexicon_json)?;
        let raw_scenarios: Vec<RawScenario> = serde_json::from_str(scenarios_json)?;

        let mut lexicon = Vec::with_capacity(entries.len());
        let mut index = HashMap::new();
        let mut by_id = HashMap::new();

        for entry in entries {
            let position = lexicon.len();
            if by_id.insert(entry.word.id.clone(), position).is_some() {
                return Err(ContentError::DuplicateWord(entry.word.id));
            }
            for form in std::iter::once(&entry.word.french).chain(entry.aliases.iter()) {
                index.entry(normalize(form)).or_insert(position);
            }
            lexicon.push(entry.word);
        }

        let mut scenarios = Vec::with_capacity(raw_scenarios.len());
        for raw in raw_scenarios {
            if raw.dialogues.is_empty() {
                return Err(ContentError::EmptyScenario(raw.id));
            }
            let mut dialogues = Vec::with_capacity(raw.dialogues.len());
            for line in raw.dialogues {
                let words = line
                    .words
                    .iter()
                    .map(|id| {
                        by_id
                            .get(id)
                            .map(|&i| lexicon[i].clone())
                            .ok_or_else(|| ContentError::UnknownWord {
                                line: line.id.clone(),
                                word: id.clone(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                dialogues.push(DialogueLine {
                    id: line.id,
                    speaker: line.speaker,
                    french: line.french,
                    chinese: line.chinese,
                    english: line.english,
                    words,
                });
            }
            scenarios.push(Scenario {
                id: raw.id,
                name: raw.name,
                name_chinese: raw.name_chinese,
                name_english: raw.name_english,
                icon: raw.icon,
                description: raw.description,
                dialogues,
            });
        }

        log::debug!(
            "catalog loaded: {} scenarios, {} lexicon entries",
            scenarios.len(),
            lexicon.len()
        );

        Ok(Self {
            scenarios,
            lexicon,
            index,
        })
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// The lesson suggested on the home screen.
    pub fn today_scenario(&self) -> Option<&Scenario> {
        self.scenarios.first()
    }

    pub fn lexicon(&self) -> &[Word] {
        &self.lexicon
    }

    /// Looks up a clicked word, tolerating case, edge punctuation and a
    /// leading elision such as `m'` or `l'`.
    pub fn word_data(&self, text: &str) -> Option<&Word> {
        let key = normalize(text);
        if key.is_empty() {
            return None;
        }
        if let Some(word) = self.get(&key) {
            return Some(word);
        }

        ELISIONS.iter().find_map(|prefix| {
            key.strip_prefix(*prefix)
                .filter(|rest| !rest.is_empty())
                .and_then(|rest| self.get(rest))
        })
    }

    /// `word_data`, or a generic entry when the lexicon has nothing.
    pub fn lookup(&self, text: &str) -> Word {
        self.word_data(text)
            .cloned()
            .unwrap_or_else(|| generic_word(text))
    }

    /// Exact, case-insensitive match on a lexicon form. No elision handling.
    pub fn dictionary_lookup(&self, query: &str) -> Option<&Word> {
        let key = query.trim().replace('’', "'").to_lowercase();
        self.get(&key)
    }

    fn get(&self, key: &str) -> Option<&Word> {
        self.index.get(key).map(|&i| &self.lexicon[i])
    }
}
