// The persisted document: { savedWords, userProgress, darkMode, speechSettings }.
// Missing fields take their defaults so older blobs keep loading.

use crate::content::Word;
use crate::storage::{BlobStore, SavedWords, StorageError};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Playback rates offered by the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum SpeechRate {
    Quarter,
    Half,
    #[default]
    ThreeQuarters,
    Normal,
}

impl SpeechRate {
    pub const ALL: [SpeechRate; 4] = [
        SpeechRate::Quarter,
        SpeechRate::Half,
        SpeechRate::ThreeQuarters,
        SpeechRate::Normal,
    ];

    pub fn value(self) -> f32 {
        match self {
            SpeechRate::Quarter => 0.25,
            SpeechRate::Half => 0.5,
            SpeechRate::ThreeQuarters => 0.75,
            SpeechRate::Normal => 1.0,
        }
    }

    pub fn from_value(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rate| (f64::from(rate.value()) - value).abs() < 1e-6)
    }

    /// Next rate, wrapping from 1.0 back to 0.25.
    pub fn cycle(self) -> Self {
        match self {
            SpeechRate::Quarter => SpeechRate::Half,
            SpeechRate::Half => SpeechRate::ThreeQuarters,
            SpeechRate::ThreeQuarters => SpeechRate::Normal,
            SpeechRate::Normal => SpeechRate::Quarter,
        }
    }
}

impl fmt::Display for SpeechRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.value())
    }
}

/// Rates other than the offered ones fall back to the default.
impl From<f64> for SpeechRate {
    fn from(value: f64) -> Self {
        SpeechRate::from_value(value).unwrap_or_else(|| {
            log::warn!("unsupported speech rate {}; using {}", value, SpeechRate::default());
            SpeechRate::default()
        })
    }
}

impl From<SpeechRate> for f64 {
    fn from(rate: SpeechRate) -> Self {
        f64::from(rate.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeechSettings {
    pub follow_along: bool,
    pub rate: SpeechRate,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            follow_along: true,
            rate: SpeechRate::ThreeQuarters,
        }
    }
}

/// Partial update; `None` fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeechSettingsUpdate {
    pub follow_along: Option<bool>,
    pub rate: Option<SpeechRate>,
}

impl SpeechSettings {
    /// Applies `update`, returning whether anything changed.
    pub fn apply(&mut self, update: SpeechSettingsUpdate) -> bool {
        let before = *self;
        if let Some(follow_along) = update.follow_along {
            self.follow_along = follow_along;
        }
        if let Some(rate) = update.rate {
            self.rate = rate;
        }
        *self != before
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub current_scenario: String,
    pub completed_lessons: Vec<String>,
    /// Kept for document compatibility; the live list is `savedWords` at the top level.
    pub saved_words: Vec<Word>,
    pub daily_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_study_date: Option<NaiveDate>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            current_scenario: String::new(),
            completed_lessons: Vec::new(),
            saved_words: Vec::new(),
            daily_streak: 1,
            last_study_date: None,
        }
    }
}

impl UserProgress {
    /// Records a lesson studied on `today`.
    ///
    /// The streak grows by one on the day after the last study day, holds on
    /// the same day and restarts at 1 after a gap. A lesson is listed once.
    pub fn record_lesson(&mut self, scenario_id: &str, today: NaiveDate) -> bool {
        let before = self.clone();

        self.current_scenario = scenario_id.to_string();
        if !self.completed_lessons.iter().any(|id| id == scenario_id) {
            self.completed_lessons.push(scenario_id.to_string());
        }

        self.daily_streak = match self.last_study_date {
            Some(last) if last == today => self.daily_streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.daily_streak.saturating_add(1),
            _ => 1,
        };
        self.last_study_date = Some(today);

        *self != before
    }

    pub fn has_completed(&self, scenario_id: &str) -> bool {
        self.completed_lessons.iter().any(|id| id == scenario_id)
    }
}

fn take_field<T: DeserializeOwned + Default>(doc: &mut Map<String, Value>, key: &str) -> T {
    match doc.remove(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("resetting unreadable `{}`: {}", key, e);
            T::default()
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub saved_words: SavedWords,
    pub user_progress: UserProgress,
    pub dark_mode: bool,
    pub speech_settings: SpeechSettings,
}

impl PersistedState {
    /// Parses the document one top-level field at a time, so a bad field
    /// resets only itself. Fails only when the blob is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let mut doc: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self {
            saved_words: take_field(&mut doc, "savedWords"),
            user_progress: take_field(&mut doc, "userProgress"),
            dark_mode: take_field(&mut doc, "darkMode"),
            speech_settings: take_field(&mut doc, "speechSettings"),
        })
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads the document once at startup. Unreadable or corrupt data is
    /// logged and replaced by defaults.
    pub fn load_or_default(store: &dyn BlobStore) -> Self {
        match store.read() {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(state) => {
                    log::info!(
                        "loaded {} saved words from {}",
                        state.saved_words.len(),
                        store.location()
                    );
                    state
                }
                Err(e) => {
                    log::warn!("ignoring corrupt data in {}: {}", store.location(), e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("could not read {}: {}", store.location(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn BlobStore) -> Result<(), StorageError> {
        let json = self.to_json()?;
        store.write(&json)?;
        log::debug!("wrote {} bytes to {}", json.len(), store.location());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let state = PersistedState::default();
        assert!(state.saved_words.is_empty());
        assert!(!state.dark_mode);
        assert!(state.speech_settings.follow_along);
        assert_eq!(state.speech_settings.rate, SpeechRate::ThreeQuarters);
        assert_eq!(state.user_progress.daily_streak, 1);
    }

    #[test]
    fn test_document_layout() {
        let json = PersistedState::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["savedWords"].is_array());
        assert_eq!(value["darkMode"], false);
        assert_eq!(value["speechSettings"]["followAlong"], true);
        assert_eq!(value["speechSettings"]["rate"], 0.75);
        assert_eq!(value["userProgress"]["dailyStreak"], 1);
        assert!(value["userProgress"].get("lastStudyDate").is_none());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let state = PersistedState::from_json(r#"{"darkMode": true}"#).unwrap();
        assert!(state.dark_mode);
        assert_eq!(state.speech_settings, SpeechSettings::default());
    }

    #[test]
    fn test_unknown_rate_falls_back_to_default() {
        let ok = PersistedState::from_json(r#"{"speechSettings": {"rate": 1}}"#).unwrap();
        assert_eq!(ok.speech_settings.rate, SpeechRate::Normal);
        let odd = PersistedState::from_json(
            r#"{"speechSettings": {"followAlong": false, "rate": 0.9}}"#,
        )
        .unwrap();
        assert_eq!(odd.speech_settings.rate, SpeechRate::ThreeQuarters);
        assert!(!odd.speech_settings.follow_along);
    }

    #[test]
    fn test_bad_field_keeps_saved_words() {
        let json = r#"{
            "savedWords": [{"id": "merci", "french": "merci", "chinese": "谢谢",
                "english": "thank you", "phonetic": "/mɛʁ.si/", "example": "",
                "exampleChinese": "", "exampleEnglish": ""}],
            "userProgress": {"dailyStreak": "three"},
            "darkMode": true,
            "speechSettings": {"rate": 1.25}
        }"#;
        let store = MemoryBlobStore::with_contents(json);
        let state = PersistedState::load_or_default(&store);
        assert_eq!(state.saved_words.len(), 1);
        assert!(state.saved_words.contains("merci"));
        assert!(state.dark_mode);
        assert_eq!(state.speech_settings.rate, SpeechRate::ThreeQuarters);
        assert_eq!(state.user_progress, UserProgress::default());
    }

    #[test]
    fn test_non_object_blob_is_rejected() {
        assert!(PersistedState::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_corrupt_blob_loads_defaults() {
        let store = MemoryBlobStore::with_contents("{not json");
        assert_eq!(PersistedState::load_or_default(&store), PersistedState::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryBlobStore::new();
        let mut state = PersistedState::default();
        state.dark_mode = true;
        state.speech_settings.rate = SpeechRate::Half;
        state.save(&mut store).unwrap();
        assert_eq!(PersistedState::load_or_default(&store), state);
    }

    #[test]
    fn test_rate_cycle_wraps() {
        assert_eq!(SpeechRate::Normal.cycle(), SpeechRate::Quarter);
        assert_eq!(SpeechRate::Quarter.to_string(), "0.25x");
    }

    #[test]
    fn test_settings_apply_reports_change() {
        let mut settings = SpeechSettings::default();
        assert!(!settings.apply(SpeechSettingsUpdate::default()));
        assert!(settings.apply(SpeechSettingsUpdate {
            rate: Some(SpeechRate::Normal),
            ..Default::default()
        }));
        assert!(settings.follow_along);
        assert!(!settings.apply(SpeechSettingsUpdate {
            follow_along: Some(true),
            rate: None,
        }));
    }

    #[test]
    fn test_streak_rules() {
        let mut progress = UserProgress::default();
        progress.record_lesson("cafe", date(2026, 3, 1));
        assert_eq!(progress.daily_streak, 1);

        progress.record_lesson("station", date(2026, 3, 1));
        assert_eq!(progress.daily_streak, 1);

        progress.record_lesson("cafe", date(2026, 3, 2));
        assert_eq!(progress.daily_streak, 2);
        assert_eq!(progress.completed_lessons, vec!["cafe", "station"]);
        assert_eq!(progress.current_scenario, "cafe");

        progress.record_lesson("cafe", date(2026, 3, 5));
        assert_eq!(progress.daily_streak, 1);
    }

    #[test]
    fn test_record_same_lesson_same_day_is_unchanged() {
        let mut progress = UserProgress::default();
        assert!(progress.record_lesson("cafe", date(2026, 3, 1)));
        assert!(!progress.record_lesson("cafe", date(2026, 3, 1)));
    }
}
