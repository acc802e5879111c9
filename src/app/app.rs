use super::event::AppEvent;
use super::mode::{AppMode, DetailTab, Screen};
use super::render_state::{step, LineView};
use super::state::AppState;
use crate::auth::{AuthError, AuthProvider, FederatedProvider, Subscription, User};
use crate::content::{Catalog, DialogueLine, Scenario, TranslationLang, Word};
use crate::speech::{Player, SpeechError, PRONUNCIATION_RATE};
use crate::storage::{SpeechSettingsUpdate, StorageError};
use crate::ui::command::{command_to_app_event, parse_command};
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// The open dialogue: which scenario and line, plus its view toggles.
pub struct DialogueState {
    pub scenario: usize,
    pub line: usize,
    pub view: LineView,
    pub show_translation: bool,
    pub lang: TranslationLang,
    pub show_settings: bool,
}

#[derive(Default)]
pub struct VocabularyState {
    pub cursor: usize,
    pub search: String,
    pub lang: TranslationLang,
}

/// The word detail overlay.
pub struct WordDetail {
    pub word: Word,
    pub tab: DetailTab,
    pub lang: TranslationLang,
}

#[derive(Debug, Clone, PartialEq)]
enum SpeechTarget {
    Line(String),
    Word(String),
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Removes the last user-perceived character, so `é` typed as e + combining
/// accent goes in one keystroke.
fn pop_grapheme(input: &mut String) {
    if let Some((idx, _)) = input.grapheme_indices(true).next_back() {
        input.truncate(idx);
    }
}

pub struct App {
    pub mode: AppMode,
    pub screen: Screen,
    catalog: Catalog,
    state: AppState,
    player: Player,
    auth: Box<dyn AuthProvider>,
    auth_events: Subscription,
    scenario_cursor: usize,
    dialogue: Option<DialogueState>,
    vocabulary: VocabularyState,
    detail: Option<WordDetail>,
    show_help: bool,
    command_input: String,
    status: Option<StatusMessage>,
    speaking: Option<SpeechTarget>,
    today: fn() -> NaiveDate,
}

impl App {
    pub fn new(
        catalog: Catalog,
        state: AppState,
        player: Player,
        mut auth: Box<dyn AuthProvider>,
    ) -> Self {
        let auth_events = auth.subscribe();
        let mut app = Self {
            mode: AppMode::Normal,
            screen: Screen::Home,
            catalog,
            state,
            player,
            auth,
            auth_events,
            scenario_cursor: 0,
            dialogue: None,
            vocabulary: VocabularyState::default(),
            detail: None,
            show_help: false,
            command_input: String::new(),
            status: None,
            speaking: None,
            today: local_today,
        };
        app.sync_auth();
        if !app.player.is_supported() {
            app.warn("Speech is not available; install espeak-ng or speech-dispatcher");
        }
        app
    }

    /// Replaces the calendar used for streaks.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user()
    }

    pub fn scenario_cursor(&self) -> usize {
        self.scenario_cursor
    }

    pub fn dialogue(&self) -> Option<&DialogueState> {
        self.dialogue.as_ref()
    }

    pub fn vocabulary(&self) -> &VocabularyState {
        &self.vocabulary
    }

    pub fn detail(&self) -> Option<&WordDetail> {
        self.detail.as_ref()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn command_input(&self) -> &str {
        &self.command_input
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn current_scenario(&self) -> Option<&Scenario> {
        let dialogue = self.dialogue.as_ref()?;
        self.catalog.scenarios().get(dialogue.scenario)
    }

    pub fn current_line(&self) -> Option<&DialogueLine> {
        let dialogue = self.dialogue.as_ref()?;
        self.current_scenario()?.dialogues.get(dialogue.line)
    }

    /// Saved words filtered by the vocabulary search term.
    pub fn vocabulary_matches(&self) -> Vec<&Word> {
        self.state.saved_words().search(&self.vocabulary.search)
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level: StatusLevel::Info,
        });
    }

    fn warn(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level: StatusLevel::Warning,
        });
    }

    fn report_storage<T>(&mut self, result: Result<T, StorageError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.warn(format!("Could not save your data: {}", e));
                None
            }
        }
    }

    // ---- per-frame housekeeping ----

    /// Applies queued speech events and auth changes. Returns true when the
    /// screen needs redrawing.
    pub fn tick(&mut self) -> bool {
        let mut changed = self.player.pump();
        changed |= self.sync_auth();
        if self.speaking.is_some() && !self.player.is_speaking() {
            self.speaking = None;
            changed = true;
        }
        self.refresh_highlight();
        changed
    }

    fn sync_auth(&mut self) -> bool {
        match self.auth_events.latest() {
            Some(user) => {
                self.state.set_current_user(user);
                true
            }
            None => false,
        }
    }

    /// The highlight shows only while the open line is being read aloud and
    /// follow-along is on.
    fn refresh_highlight(&mut self) {
        let follow_along = self.state.speech_settings().follow_along;
        let speaking_line = match &self.speaking {
            Some(SpeechTarget::Line(id)) if self.player.is_speaking() => Some(id.clone()),
            _ => None,
        };
        let current_id = self.current_line().map(|line| line.id.clone());
        let highlighted = if follow_along && speaking_line.is_some() && speaking_line == current_id {
            self.player.highlighted()
        } else {
            None
        };
        if let Some(dialogue) = self.dialogue.as_mut() {
            dialogue.view.highlighted = highlighted;
        }
    }

    // ---- keys ----

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.handle_event(AppEvent::Quit);
            return;
        }
        match self.mode {
            AppMode::Command => self.handle_command_key(key),
            AppMode::Search => self.handle_search_key(key),
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Quit => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let input = format!(":{}", self.command_input);
                self.command_input.clear();
                self.mode = AppMode::Normal;
                let event = command_to_app_event(parse_command(&input));
                self.handle_event(event);
            }
            KeyCode::Esc => {
                self.command_input.clear();
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                if self.command_input.is_empty() {
                    self.mode = AppMode::Normal;
                } else {
                    pop_grapheme(&mut self.command_input);
                }
            }
            KeyCode::Char(c) => self.command_input.push(c),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.mode = AppMode::Normal,
            KeyCode::Esc => {
                self.vocabulary.search.clear();
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => pop_grapheme(&mut self.vocabulary.search),
            KeyCode::Char(c) => self.vocabulary.search.push(c),
            _ => return,
        }
        self.vocabulary.cursor = 0;
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if key.code == KeyCode::Char(':') {
            self.mode = AppMode::Command;
            self.command_input.clear();
            return;
        }
        if self.detail.is_some() {
            self.handle_detail_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => {
                self.handle_event(AppEvent::Quit);
                return;
            }
            KeyCode::Char('?') => {
                self.handle_event(AppEvent::Help);
                return;
            }
            _ => {}
        }
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Scenarios => self.handle_scenarios_key(key),
            Screen::Dialogue => self.handle_dialogue_key(key),
            Screen::Vocabulary => self.handle_vocabulary_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.start_today_lesson(),
            KeyCode::Char('s') => self.go_to(Screen::Scenarios),
            KeyCode::Char('v') => self.go_to(Screen::Vocabulary),
            KeyCode::Char('d') => self.handle_event(AppEvent::ToggleDarkMode),
            _ => {}
        }
    }

    fn handle_scenarios_key(&mut self, key: KeyEvent) {
        let count = self.catalog.scenarios().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.scenario_cursor = step(self.scenario_cursor, -1, count);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scenario_cursor = step(self.scenario_cursor, 1, count);
            }
            KeyCode::Enter => self.open_dialogue(self.scenario_cursor),
            KeyCode::Esc | KeyCode::Backspace => self.go_to(Screen::Home),
            _ => {}
        }
    }

    fn handle_dialogue_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_word_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_word_selection(1),
            KeyCode::Enter => self.open_selected_word(),
            KeyCode::Char(' ') => self.toggle_line_playback(),
            KeyCode::Char('n') | KeyCode::Down | KeyCode::PageDown => self.next_line(),
            KeyCode::Char('p') | KeyCode::Up | KeyCode::PageUp => self.previous_line(),
            KeyCode::Char('t') => {
                if let Some(dialogue) = self.dialogue.as_mut() {
                    dialogue.show_translation = !dialogue.show_translation;
                }
            }
            KeyCode::Char('c') => {
                if let Some(dialogue) = self.dialogue.as_mut() {
                    dialogue.lang = dialogue.lang.toggle();
                }
            }
            KeyCode::Char('s') => {
                if let Some(dialogue) = self.dialogue.as_mut() {
                    dialogue.show_settings = !dialogue.show_settings;
                }
            }
            KeyCode::Char('f') => self.handle_event(AppEvent::ToggleFollowAlong),
            KeyCode::Char('r') => self.handle_event(AppEvent::SetRate(None)),
            KeyCode::Esc | KeyCode::Backspace => self.go_to(Screen::Scenarios),
            _ => {}
        }
    }

    fn handle_vocabulary_key(&mut self, key: KeyEvent) {
        let count = self.vocabulary_matches().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.vocabulary.cursor = step(self.vocabulary.cursor, -1, count);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.vocabulary.cursor = step(self.vocabulary.cursor, 1, count);
            }
            KeyCode::Char('/') => self.mode = AppMode::Search,
            KeyCode::Char('c') => self.vocabulary.lang = self.vocabulary.lang.toggle(),
            KeyCode::Enter => {
                if let Some(word) = self.vocabulary_selection() {
                    let lang = self.vocabulary.lang;
                    self.open_detail(word, lang);
                }
            }
            KeyCode::Char('p') => {
                if let Some(word) = self.vocabulary_selection() {
                    self.pronounce(&word);
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => self.delete_selected_word(),
            KeyCode::Esc => {
                if self.vocabulary.search.is_empty() {
                    self.go_to(Screen::Home);
                } else {
                    self.vocabulary.search.clear();
                    self.vocabulary.cursor = 0;
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Right => detail.tab = detail.tab.next(),
            KeyCode::Char('1') => detail.tab = DetailTab::Definition,
            KeyCode::Char('2') => detail.tab = DetailTab::Grammar,
            KeyCode::Char('3') => detail.tab = DetailTab::Conjugation,
            KeyCode::Char('c') => detail.lang = detail.lang.toggle(),
            KeyCode::Char('s') => self.save_detail_word(),
            KeyCode::Char('p') => {
                let word = detail.word.clone();
                self.pronounce(&word);
            }
            KeyCode::Esc | KeyCode::Char('q') => self.detail = None,
            _ => {}
        }
    }

    // ---- events ----

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Navigate(screen) => self.go_to(screen),
            AppEvent::SignIn { email, password } => {
                let result = self.auth.sign_in_with_password(&email, &password);
                self.after_sign_in(result);
            }
            AppEvent::Register { email, password } => {
                let result = self.auth.register(&email, &password);
                self.after_sign_in(result);
            }
            AppEvent::SignInGoogle => {
                let result = self.auth.sign_in_federated(FederatedProvider::Google);
                self.after_sign_in(result);
            }
            AppEvent::SignOut => {
                if self.state.current_user().is_none() {
                    self.warn("Not signed in");
                } else {
                    self.auth.sign_out();
                    self.sync_auth();
                    self.info("Signed out");
                }
            }
            AppEvent::SetRate(rate) => {
                let rate = rate.unwrap_or_else(|| self.state.speech_settings().rate.cycle());
                let result = self.state.update_speech_settings(SpeechSettingsUpdate {
                    rate: Some(rate),
                    ..Default::default()
                });
                if let Some(settings) = self.report_storage(result) {
                    self.info(format!("Speech rate {}", settings.rate));
                }
            }
            AppEvent::ToggleFollowAlong => {
                let follow_along = !self.state.speech_settings().follow_along;
                let result = self.state.update_speech_settings(SpeechSettingsUpdate {
                    follow_along: Some(follow_along),
                    ..Default::default()
                });
                if self.report_storage(result).is_some() {
                    self.info(if follow_along {
                        "Follow-along on"
                    } else {
                        "Follow-along off"
                    });
                }
                self.refresh_highlight();
            }
            AppEvent::ToggleDarkMode => {
                let result = self.state.toggle_dark_mode();
                if let Some(dark) = self.report_storage(result) {
                    self.info(if dark { "Dark mode" } else { "Light mode" });
                }
            }
            AppEvent::Dictionary(query) => match self.catalog.dictionary_lookup(&query) {
                Some(word) => {
                    let word = word.clone();
                    self.open_detail(word, TranslationLang::default());
                }
                None => self.warn(format!("\"{}\" is not in the dictionary", query.trim())),
            },
            AppEvent::Quit => {
                self.player.stop();
                self.speaking = None;
                self.mode = AppMode::Quit;
            }
            AppEvent::Help => self.show_help = true,
            AppEvent::Warning(message) => self.warn(message),
            AppEvent::InvalidCommand(input) => self.warn(format!("Unknown command: {}", input)),
            AppEvent::None => {}
        }
    }

    fn after_sign_in(&mut self, result: Result<User, AuthError>) {
        match result {
            Ok(user) => {
                self.sync_auth();
                self.info(format!("Signed in as {}", user.label()));
            }
            Err(e) => self.warn(format!("Sign-in failed: {}", e)),
        }
    }

    // ---- navigation ----

    fn go_to(&mut self, screen: Screen) {
        if screen == Screen::Dialogue && self.dialogue.is_none() {
            return;
        }
        if self.screen == Screen::Dialogue && screen != Screen::Dialogue {
            self.stop_speech();
        }
        self.detail = None;
        self.screen = screen;
    }

    fn start_today_lesson(&mut self) {
        let today_id = self.catalog.today_scenario().map(|s| s.id.clone());
        let index = today_id.and_then(|id| self.catalog.scenarios().iter().position(|s| s.id == id));
        if let Some(index) = index {
            self.open_dialogue(index);
        }
    }

    pub fn open_dialogue(&mut self, scenario: usize) {
        let Some(first) = self
            .catalog
            .scenarios()
            .get(scenario)
            .and_then(|s| s.dialogues.first())
        else {
            return;
        };
        let view = LineView::new(&first.french);
        self.stop_speech();
        self.scenario_cursor = scenario;
        self.dialogue = Some(DialogueState {
            scenario,
            line: 0,
            view,
            show_translation: true,
            lang: TranslationLang::default(),
            show_settings: false,
        });
        self.select_first_word();
        self.detail = None;
        self.screen = Screen::Dialogue;
    }

    fn set_line(&mut self, line: usize) {
        let Some(text) = self
            .current_scenario()
            .and_then(|s| s.dialogues.get(line))
            .map(|l| l.french.clone())
        else {
            return;
        };
        self.stop_speech();
        if let Some(dialogue) = self.dialogue.as_mut() {
            dialogue.line = line;
            dialogue.view = LineView::new(&text);
        }
        self.select_first_word();
    }

    fn next_line(&mut self) {
        let Some(dialogue) = self.dialogue.as_ref() else {
            return;
        };
        let line = dialogue.line;
        let total = self.current_scenario().map_or(0, |s| s.dialogues.len());
        if line + 1 < total {
            self.set_line(line + 1);
        } else {
            self.finish_lesson();
        }
    }

    fn previous_line(&mut self) {
        if let Some(line) = self.dialogue.as_ref().map(|d| d.line) {
            if line > 0 {
                self.set_line(line - 1);
            }
        }
    }

    fn finish_lesson(&mut self) {
        let Some(scenario) = self.current_scenario().map(|s| (s.id.clone(), s.name.clone())) else {
            return;
        };
        let today = (self.today)();
        let result = self.state.update_progress(&scenario.0, today);
        if self.report_storage(result).is_some() {
            let streak = self.state.user_progress().daily_streak;
            self.info(format!(
                "Lesson \"{}\" complete! Streak: {} day(s)",
                scenario.1, streak
            ));
        }
    }

    // ---- words ----

    fn select_first_word(&mut self) {
        if let Some(dialogue) = self.dialogue.as_mut() {
            dialogue.view.selected = dialogue.view.clickable().first().copied();
        }
    }

    fn move_word_selection(&mut self, delta: isize) {
        let Some(dialogue) = self.dialogue.as_mut() else {
            return;
        };
        let clickable = dialogue.view.clickable();
        let position = clickable
            .iter()
            .position(|&i| Some(i) == dialogue.view.selected)
            .unwrap_or(0);
        let target = step(position, delta, clickable.len());
        dialogue.view.selected = clickable.get(target).copied();
    }

    fn open_selected_word(&mut self) {
        let Some(dialogue) = self.dialogue.as_ref() else {
            return;
        };
        let lang = dialogue.lang;
        let Some(text) = dialogue.view.selected_token().map(|t| t.text.clone()) else {
            return;
        };
        let word = self.catalog.lookup(&text);
        let rate = self.state.speech_settings().rate.value();
        self.speak_word(&word, rate);
        self.open_detail(word, lang);
    }

    fn open_detail(&mut self, word: Word, lang: TranslationLang) {
        self.detail = Some(WordDetail {
            word,
            tab: DetailTab::default(),
            lang,
        });
    }

    fn save_detail_word(&mut self) {
        let Some(word) = self.detail.as_ref().map(|d| d.word.clone()) else {
            return;
        };
        let french = word.french.clone();
        let result = self.state.add_word_to_vocabulary(word);
        match self.report_storage(result) {
            Some(true) => self.info(format!("Saved \"{}\" to your vocabulary", french)),
            Some(false) => self.info(format!("\"{}\" is already saved", french)),
            None => {}
        }
    }

    fn vocabulary_selection(&self) -> Option<Word> {
        self.vocabulary_matches()
            .get(self.vocabulary.cursor)
            .map(|w| (*w).clone())
    }

    fn delete_selected_word(&mut self) {
        let Some(word) = self.vocabulary_selection() else {
            return;
        };
        let result = self.state.remove_word_from_vocabulary(&word.id);
        if let Some(true) = self.report_storage(result) {
            self.info(format!("Removed \"{}\"", word.french));
        }
        let remaining = self.vocabulary_matches().len();
        self.vocabulary.cursor = self.vocabulary.cursor.min(remaining.saturating_sub(1));
    }

    // ---- speech ----

    fn stop_speech(&mut self) {
        if self.speaking.take().is_some() {
            self.player.stop();
        }
        self.refresh_highlight();
    }

    fn report_speech(&mut self, error: SpeechError) {
        if error.is_unsupported() {
            self.warn("Speech is not supported on this system");
        } else {
            self.warn(format!("Speech failed: {}", error));
        }
    }

    fn toggle_line_playback(&mut self) {
        let Some(line) = self.current_line().map(|l| (l.id.clone(), l.french.clone())) else {
            return;
        };
        let already = matches!(&self.speaking, Some(SpeechTarget::Line(id)) if *id == line.0);
        if already && self.player.is_speaking() {
            self.stop_speech();
            return;
        }

        let rate = self.state.speech_settings().rate.value();
        match self.player.play(&line.1, rate) {
            Ok(_) => self.speaking = Some(SpeechTarget::Line(line.0)),
            Err(e) => {
                self.speaking = None;
                self.report_speech(e);
            }
        }
        self.refresh_highlight();
    }

    /// Slow, careful pronunciation used by the word card and vocabulary list.
    fn pronounce(&mut self, word: &Word) {
        self.speak_word(word, PRONUNCIATION_RATE);
    }

    fn speak_word(&mut self, word: &Word, rate: f32) {
        match self.player.play(&word.french, rate) {
            Ok(_) => self.speaking = Some(SpeechTarget::Word(word.id.clone())),
            Err(e) => {
                self.speaking = None;
                self.report_speech(e);
            }
        }
        self.refresh_highlight();
    }
}
