use crate::auth::User;
use crate::content::Word;
use crate::storage::{
    BlobStore, PersistedState, SavedWords, SpeechSettings, SpeechSettingsUpdate, StorageError,
    UserProgress,
};
use chrono::NaiveDate;

/// Everything the screens share: saved words, progress, dark mode, speech
/// settings and the signed-in user.
///
/// Constructed once in `main` and passed by reference. Each effective
/// mutation writes the whole document back to the store. A failed write is
/// returned to the caller while the in-memory change stays applied.
pub struct AppState {
    data: PersistedState,
    store: Box<dyn BlobStore>,
    current_user: Option<User>,
}

impl AppState {
    /// Reads the persisted document once; corrupt or missing data yields defaults.
    pub fn load(store: Box<dyn BlobStore>) -> Self {
        let data = PersistedState::load_or_default(store.as_ref());
        Self {
            data,
            store,
            current_user: None,
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.data.save(self.store.as_mut()).map_err(|e| {
            log::warn!("could not save to {}: {}", self.store.location(), e);
            e
        })
    }

    pub fn saved_words(&self) -> &SavedWords {
        &self.data.saved_words
    }

    /// Returns whether the word was newly added.
    pub fn add_word_to_vocabulary(&mut self, word: Word) -> Result<bool, StorageError> {
        let id = word.id.clone();
        if !self.data.saved_words.add(word) {
            return Ok(false);
        }
        log::info!("saved word {}", id);
        self.persist()?;
        Ok(true)
    }

    /// Returns whether a word was removed.
    pub fn remove_word_from_vocabulary(&mut self, id: &str) -> Result<bool, StorageError> {
        if !self.data.saved_words.remove(id) {
            return Ok(false);
        }
        log::info!("removed word {}", id);
        self.persist()?;
        Ok(true)
    }

    pub fn is_word_saved(&self, id: &str) -> bool {
        self.data.saved_words.contains(id)
    }

    pub fn user_progress(&self) -> &UserProgress {
        &self.data.user_progress
    }

    /// Marks `scenario_id` studied on `today` and makes it the current scenario.
    pub fn update_progress(&mut self, scenario_id: &str, today: NaiveDate) -> Result<(), StorageError> {
        if self.data.user_progress.record_lesson(scenario_id, today) {
            log::info!(
                "lesson {} recorded, streak {}",
                scenario_id,
                self.data.user_progress.daily_streak
            );
            self.persist()?;
        }
        Ok(())
    }

    /// Percent shown next to a scenario in the list.
    pub fn scenario_progress(&self, scenario_id: &str) -> u8 {
        if self.data.user_progress.has_completed(scenario_id) {
            100
        } else {
            0
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.data.dark_mode
    }

    /// Flips dark mode and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, StorageError> {
        self.data.dark_mode = !self.data.dark_mode;
        self.persist()?;
        Ok(self.data.dark_mode)
    }

    pub fn speech_settings(&self) -> SpeechSettings {
        self.data.speech_settings
    }

    pub fn update_speech_settings(
        &mut self,
        update: SpeechSettingsUpdate,
    ) -> Result<SpeechSettings, StorageError> {
        if self.data.speech_settings.apply(update) {
            self.persist()?;
        }
        Ok(self.data.speech_settings)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Session-only; the user is never written to the store.
    pub fn set_current_user(&mut self, user: Option<User>) {
        self.current_user = user;
    }
}
