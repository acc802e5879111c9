// Lesson content types shared by the catalog, the saved-word list and the UI.
// Field names serialize in camelCase so the persisted blob keeps its layout.

use serde::{Deserialize, Serialize};

/// Which translation the learner is reading alongside the French.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationLang {
    #[default]
    Chinese,
    English,
}

impl TranslationLang {
    pub fn toggle(self) -> Self {
        match self {
            TranslationLang::Chinese => TranslationLang::English,
            TranslationLang::English => TranslationLang::Chinese,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TranslationLang::Chinese => "中文",
            TranslationLang::English => "EN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordType {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Other,
}

impl WordType {
    pub fn label(self) -> &'static str {
        match self {
            WordType::Noun => "noun",
            WordType::Verb => "verb",
            WordType::Adjective => "adjective",
            WordType::Adverb => "adverb",
            WordType::Preposition => "preposition",
            WordType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculine,
    Feminine,
    Neutral,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Masculine => "masculine (m.)",
            Gender::Feminine => "feminine (f.)",
            Gender::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    #[serde(rename = "type")]
    pub word_type: WordType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_notes: Option<String>,
}

impl Grammar {
    /// Notes in the requested language, falling back to the untranslated ones.
    pub fn notes_in(&self, lang: TranslationLang) -> Option<&str> {
        let translated = match lang {
            TranslationLang::Chinese => self.chinese_notes.as_deref(),
            TranslationLang::English => self.english_notes.as_deref(),
        };
        translated.or(self.notes.as_deref())
    }
}

/// Six forms per tense, je through ils/elles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conjugation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Vec<String>>,
}

impl Conjugation {
    /// Tenses that have forms, labelled for display.
    pub fn tenses(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Présent", &self.present),
            ("Passé composé", &self.past),
            ("Futur", &self.future),
            ("Conditionnel", &self.conditional),
        ]
        .into_iter()
        .filter_map(|(label, forms)| forms.as_deref().map(|f| (label, f)))
        .collect()
    }
}

/// A vocabulary entry. Also the element type of the saved-word list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub french: String,
    pub chinese: String,
    pub english: String,
    pub phonetic: String,
    pub example: String,
    pub example_chinese: String,
    pub example_english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conjugation: Option<Conjugation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar: Option<Grammar>,
}

impl Word {
    pub fn translation(&self, lang: TranslationLang) -> &str {
        match lang {
            TranslationLang::Chinese => &self.chinese,
            TranslationLang::English => &self.english,
        }
    }

    pub fn example_translation(&self, lang: TranslationLang) -> &str {
        match lang {
            TranslationLang::Chinese => &self.example_chinese,
            TranslationLang::English => &self.example_english,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub id: String,
    pub speaker: String,
    pub french: String,
    pub chinese: String,
    pub english: String,
    pub words: Vec<Word>,
}

impl DialogueLine {
    pub fn translation(&self, lang: TranslationLang) -> &str {
        match lang {
            TranslationLang::Chinese => &self.chinese,
            TranslationLang::English => &self.english,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub name_chinese: String,
    pub name_english: String,
    pub icon: String,
    pub description: String,
    pub dialogues: Vec<DialogueLine>,
}

impl Scenario {
    pub fn translated_name(&self, lang: TranslationLang) -> &str {
        match lang {
            TranslationLang::Chinese => &self.name_chinese,
            TranslationLang::English => &self.name_english,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_json_uses_camel_case() {
        let json = r#"{
            "id": "lait", "french": "lait", "chinese": "牛奶", "english": "milk",
            "phonetic": "/lɛ/", "example": "Du lait.", "exampleChinese": "牛奶。",
            "exampleEnglish": "Milk.",
            "grammar": { "type": "noun", "gender": "masculine", "englishNotes": "Uncountable." }
        }"#;
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word.example_english, "Milk.");
        let grammar = word.grammar.as_ref().unwrap();
        assert_eq!(grammar.word_type, WordType::Noun);
        assert_eq!(grammar.gender, Some(Gender::Masculine));
        assert!(word.conjugation.is_none());

        let out = serde_json::to_value(&word).unwrap();
        assert_eq!(out["exampleChinese"], "牛奶。");
        assert_eq!(out["grammar"]["type"], "noun");
        assert!(out.get("conjugation").is_none());
    }

    #[test]
    fn test_grammar_notes_fallback() {
        let grammar = Grammar {
            word_type: WordType::Verb,
            gender: None,
            notes: Some("irregular".to_string()),
            chinese_notes: Some("不规则".to_string()),
            english_notes: None,
        };
        assert_eq!(grammar.notes_in(TranslationLang::Chinese), Some("不规则"));
        assert_eq!(grammar.notes_in(TranslationLang::English), Some("irregular"));
    }

    #[test]
    fn test_conjugation_skips_missing_tenses() {
        let conjugation = Conjugation {
            present: Some(vec!["je suis".to_string()]),
            future: Some(vec!["je serai".to_string()]),
            ..Default::default()
        };
        let labels: Vec<_> = conjugation.tenses().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Présent", "Futur"]);
    }

    #[test]
    fn test_translation_lang_toggle() {
        assert_eq!(TranslationLang::Chinese.toggle(), TranslationLang::English);
        assert_eq!(TranslationLang::English.toggle(), TranslationLang::Chinese);
    }
}
