use crate::app::{App, AppEvent, AppMode, AppState, DetailTab, Screen, StatusLevel};
use crate::auth::{FederatedProvider, LocalAuthProvider};
use crate::content::Catalog;
use crate::reading::SessionId;
use crate::speech::{
    Player, SpeechDriver, SpeechError, SpeechEvent, SpeechRequest, UnavailableDriver, Voice,
};
use crate::storage::{MemoryBlobStore, PersistedState, SpeechRate};
use chrono::NaiveDate;
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, Mutex};

type Spoken = Arc<Mutex<Vec<(SessionId, SpeechRequest)>>>;

/// Accepts every request and never reports progress by itself.
struct QuietDriver {
    spoken: Spoken,
}

impl SpeechDriver for QuietDriver {
    fn name(&self) -> &str {
        "quiet"
    }
    fn is_available(&self) -> bool {
        true
    }
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }
    fn speak(
        &mut self,
        session: SessionId,
        request: &SpeechRequest,
        _events: Sender<SpeechEvent>,
    ) -> Result<(), SpeechError> {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push((session, request.clone()));
        }
        Ok(())
    }
    fn cancel(&mut self) {}
}

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

struct Harness {
    app: App,
    store: MemoryBlobStore,
    spoken: Spoken,
}

fn harness() -> Harness {
    let store = MemoryBlobStore::new();
    let spoken: Spoken = Arc::new(Mutex::new(Vec::new()));
    let player = Player::new(
        Box::new(QuietDriver {
            spoken: spoken.clone(),
        }),
        1.0,
    );
    let auth = LocalAuthProvider::new()
        .with_account("marie@example.fr", "secret1")
        .unwrap()
        .link(FederatedProvider::Google, "luc@gmail.com", "Luc");
    let app = App::new(
        Catalog::builtin().unwrap(),
        AppState::load(Box::new(store.clone())),
        player,
        Box::new(auth),
    )
    .with_clock(fixed_today);
    Harness { app, store, spoken }
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_command(app: &mut App, command: &str) {
    press(app, KeyCode::Char(':'));
    for c in command.chars() {
        press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter);
}

fn last_session(spoken: &Spoken) -> SessionId {
    spoken.lock().unwrap().last().unwrap().0
}

#[test]
fn test_app_starts_on_home() {
    let h = harness();
    assert_eq!(h.app.mode(), AppMode::Normal);
    assert_eq!(h.app.screen, Screen::Home);
    assert!(h.app.current_user().is_none());
    assert!(h.app.status().is_none());
}

#[test]
fn test_app_handle_event_quit() {
    let mut h = harness();
    h.app.handle_event(AppEvent::Quit);
    assert_eq!(h.app.mode, AppMode::Quit);
}

#[test]
fn test_q_key_quits() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('q'));
    assert_eq!(h.app.mode(), AppMode::Quit);
}

#[test]
fn test_help_overlay_closes_on_any_key() {
    let mut h = harness();
    type_command(&mut h.app, "h");
    assert!(h.app.show_help());
    press(&mut h.app, KeyCode::Char('x'));
    assert!(!h.app.show_help());
    assert_eq!(h.app.mode(), AppMode::Normal);
}

#[test]
fn test_enter_on_home_opens_today_lesson() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Enter);
    assert_eq!(h.app.screen, Screen::Dialogue);
    assert_eq!(h.app.current_scenario().unwrap().id, "cafe");
    let dialogue = h.app.dialogue().unwrap();
    assert_eq!(dialogue.line, 0);
    assert_eq!(dialogue.view.selected, Some(0));
}

#[test]
fn test_word_selection_skips_whitespace() {
    let mut h = harness();
    h.app.open_dialogue(1);
    // "Bonjour ! Comment tu t'appelles ?"
    press(&mut h.app, KeyCode::Right);
    let selected = h.app.dialogue().unwrap().view.selected_token().unwrap().text.clone();
    assert_eq!(selected, "!");
    press(&mut h.app, KeyCode::Right);
    let selected = h.app.dialogue().unwrap().view.selected_token().unwrap().text.clone();
    assert_eq!(selected, "Comment");
    press(&mut h.app, KeyCode::Left);
    press(&mut h.app, KeyCode::Left);
    press(&mut h.app, KeyCode::Left);
    let selected = h.app.dialogue().unwrap().view.selected_token().unwrap().text.clone();
    assert_eq!(selected, "Bonjour");
}

#[test]
fn test_open_word_detail_and_save() {
    let mut h = harness();
    h.app.open_dialogue(1);
    press(&mut h.app, KeyCode::Down);
    // "Je m'appelle Marie. Et toi ?"
    press(&mut h.app, KeyCode::Right);
    press(&mut h.app, KeyCode::Enter);
    let detail = h.app.detail().unwrap();
    assert_eq!(detail.word.id, "appeler");
    assert_eq!(detail.tab, DetailTab::Definition);

    press(&mut h.app, KeyCode::Tab);
    assert_eq!(h.app.detail().unwrap().tab, DetailTab::Grammar);

    press(&mut h.app, KeyCode::Char('s'));
    assert!(h.app.state().is_word_saved("appeler"));
    press(&mut h.app, KeyCode::Char('s'));
    assert_eq!(h.app.state().saved_words().len(), 1);
    assert!(h.app.status().unwrap().text.contains("already saved"));

    let persisted = PersistedState::from_json(&h.store.contents().unwrap()).unwrap();
    assert!(persisted.saved_words.contains("appeler"));

    press(&mut h.app, KeyCode::Esc);
    assert!(h.app.detail().is_none());
}

#[test]
fn test_unknown_word_gets_generic_entry() {
    let mut h = harness();
    h.app.open_dialogue(1);
    press(&mut h.app, KeyCode::Down);
    // Je m'appelle Marie -> third word
    press(&mut h.app, KeyCode::Right);
    press(&mut h.app, KeyCode::Right);
    press(&mut h.app, KeyCode::Enter);
    assert_eq!(h.app.detail().unwrap().word.id, "generic-marie");
}

#[test]
fn test_play_line_and_follow_along_highlight() {
    let mut h = harness();
    h.app.open_dialogue(1);
    press(&mut h.app, KeyCode::Down);
    press(&mut h.app, KeyCode::Char(' '));

    let (session, request) = h.spoken.lock().unwrap().last().cloned().unwrap();
    assert_eq!(request.text, "Je m'appelle Marie. Et toi ?");
    assert_eq!(request.rate, 0.75);
    assert_eq!(request.language, "fr-FR");

    h.app.player().inject(SpeechEvent::word(session, 13, 5));
    assert!(h.app.tick());
    assert_eq!(h.app.dialogue().unwrap().view.highlighted, Some(4));

    h.app.player().inject(SpeechEvent::end(session));
    h.app.tick();
    assert_eq!(h.app.dialogue().unwrap().view.highlighted, None);
}

#[test]
fn test_follow_along_off_hides_highlight() {
    let mut h = harness();
    h.app.open_dialogue(0);
    type_command(&mut h.app, "follow");
    assert!(!h.app.state().speech_settings().follow_along);

    press(&mut h.app, KeyCode::Char(' '));
    let session = last_session(&h.spoken);
    h.app.player().inject(SpeechEvent::word(session, 0, 7));
    h.app.tick();
    assert!(h.app.player().is_speaking());
    assert_eq!(h.app.dialogue().unwrap().view.highlighted, None);
}

#[test]
fn test_changing_line_discards_old_events() {
    let mut h = harness();
    h.app.open_dialogue(0);
    press(&mut h.app, KeyCode::Char(' '));
    let old = last_session(&h.spoken);

    press(&mut h.app, KeyCode::Char('n'));
    press(&mut h.app, KeyCode::Char(' '));
    let new = last_session(&h.spoken);
    assert_ne!(old, new);

    h.app.player().inject(SpeechEvent::word(old, 8, 6));
    h.app.tick();
    assert_eq!(h.app.dialogue().unwrap().view.highlighted, None);

    h.app.player().inject(SpeechEvent::word(new, 0, 2));
    h.app.tick();
    assert_eq!(h.app.dialogue().unwrap().view.highlighted, Some(0));
}

#[test]
fn test_space_again_stops_playback() {
    let mut h = harness();
    h.app.open_dialogue(0);
    press(&mut h.app, KeyCode::Char(' '));
    assert!(h.app.player().is_speaking());
    press(&mut h.app, KeyCode::Char(' '));
    assert!(!h.app.player().is_speaking());
}

#[test]
fn test_pronounce_uses_slow_rate() {
    let mut h = harness();
    type_command(&mut h.app, "dict gare");
    assert_eq!(h.app.detail().unwrap().word.id, "gare");
    press(&mut h.app, KeyCode::Char('p'));
    let (_, request) = h.spoken.lock().unwrap().last().cloned().unwrap();
    assert_eq!(request.text, "gare");
    assert_eq!(request.rate, 0.7);
}

#[test]
fn test_selecting_word_speaks_it_at_playback_rate() {
    let mut h = harness();
    h.app.open_dialogue(0);
    press(&mut h.app, KeyCode::Enter);
    let (_, request) = h.spoken.lock().unwrap().last().cloned().unwrap();
    assert_eq!(request.text, "bonjour");
    assert_eq!(request.rate, 0.75);
    assert_eq!(h.app.detail().unwrap().word.id, "bonjour");

    press(&mut h.app, KeyCode::Esc);
    type_command(&mut h.app, "rate 1");
    press(&mut h.app, KeyCode::Enter);
    let (_, request) = h.spoken.lock().unwrap().last().cloned().unwrap();
    assert_eq!(request.rate, 1.0);

    // the card's own pronounce button stays slow
    press(&mut h.app, KeyCode::Char('p'));
    let (_, request) = h.spoken.lock().unwrap().last().cloned().unwrap();
    assert_eq!(request.rate, 0.7);
}

#[test]
fn test_dictionary_miss_warns() {
    let mut h = harness();
    type_command(&mut h.app, "dict xyzzy");
    assert!(h.app.detail().is_none());
    assert_eq!(h.app.status().unwrap().level, StatusLevel::Warning);
}

#[test]
fn test_finishing_lesson_records_progress() {
    let mut h = harness();
    h.app.open_dialogue(2);
    for _ in 0..5 {
        press(&mut h.app, KeyCode::Char('n'));
    }
    assert_eq!(h.app.dialogue().unwrap().line, 4);
    let progress = h.app.state().user_progress();
    assert_eq!(progress.current_scenario, "station");
    assert_eq!(progress.completed_lessons, vec!["station"]);
    assert_eq!(progress.last_study_date, Some(fixed_today()));
    assert_eq!(h.app.state().scenario_progress("station"), 100);
}

#[test]
fn test_rate_command_cycles_and_persists() {
    let mut h = harness();
    type_command(&mut h.app, "rate");
    assert_eq!(h.app.state().speech_settings().rate, SpeechRate::Normal);
    type_command(&mut h.app, "rate 0.25");
    assert_eq!(h.app.state().speech_settings().rate, SpeechRate::Quarter);

    let persisted = PersistedState::from_json(&h.store.contents().unwrap()).unwrap();
    assert_eq!(persisted.speech_settings.rate, SpeechRate::Quarter);
}

#[test]
fn test_login_and_logout_update_header_user() {
    let mut h = harness();
    type_command(&mut h.app, "login marie@example.fr wrong");
    assert!(h.app.current_user().is_none());
    assert_eq!(h.app.status().unwrap().level, StatusLevel::Warning);

    type_command(&mut h.app, "login marie@example.fr secret1");
    assert_eq!(h.app.current_user().unwrap().initial(), 'M');

    type_command(&mut h.app, "logout");
    assert!(h.app.current_user().is_none());
}

#[test]
fn test_google_sign_in_uses_linked_account() {
    let mut h = harness();
    type_command(&mut h.app, "google");
    assert_eq!(
        h.app.current_user().unwrap().email.as_deref(),
        Some("luc@gmail.com")
    );
}

#[test]
fn test_vocabulary_search_and_delete() {
    let mut h = harness();
    type_command(&mut h.app, "dict gare");
    press(&mut h.app, KeyCode::Char('s'));
    press(&mut h.app, KeyCode::Esc);
    type_command(&mut h.app, "dict lait");
    press(&mut h.app, KeyCode::Char('s'));
    press(&mut h.app, KeyCode::Esc);

    type_command(&mut h.app, "vocab");
    assert_eq!(h.app.screen, Screen::Vocabulary);
    assert_eq!(h.app.vocabulary_matches().len(), 2);

    press(&mut h.app, KeyCode::Char('/'));
    assert_eq!(h.app.mode(), AppMode::Search);
    for c in "milk".chars() {
        press(&mut h.app, KeyCode::Char(c));
    }
    press(&mut h.app, KeyCode::Enter);
    let matches: Vec<_> = h.app.vocabulary_matches().iter().map(|w| w.id.clone()).collect();
    assert_eq!(matches, vec!["lait"]);

    press(&mut h.app, KeyCode::Char('x'));
    assert!(!h.app.state().is_word_saved("lait"));
    assert!(h.app.state().is_word_saved("gare"));
}

#[test]
fn test_command_backspace_removes_whole_grapheme() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char(':'));
    for c in "dict e\u{301}".chars() {
        press(&mut h.app, KeyCode::Char(c));
    }
    press(&mut h.app, KeyCode::Backspace);
    assert_eq!(h.app.command_input(), "dict ");
}

#[test]
fn test_unknown_command_warns() {
    let mut h = harness();
    type_command(&mut h.app, "fly");
    let status = h.app.status().unwrap();
    assert_eq!(status.level, StatusLevel::Warning);
    assert!(status.text.contains(":fly"));
}

#[test]
fn test_unsupported_speech_is_recoverable() {
    let store = MemoryBlobStore::new();
    let mut app = App::new(
        Catalog::builtin().unwrap(),
        AppState::load(Box::new(store)),
        Player::new(Box::new(UnavailableDriver), 1.0),
        Box::new(LocalAuthProvider::new()),
    );
    app.open_dialogue(0);
    press(&mut app, KeyCode::Char(' '));
    assert!(!app.player().is_speaking());
    assert_eq!(app.status().unwrap().level, StatusLevel::Warning);
    assert_eq!(app.screen, Screen::Dialogue);
}

#[test]
fn test_dark_mode_toggle_persists() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('d'));
    assert!(h.app.state().dark_mode());
    let persisted = PersistedState::from_json(&h.store.contents().unwrap()).unwrap();
    assert!(persisted.dark_mode);
}

#[test]
fn test_leaving_dialogue_stops_speech() {
    let mut h = harness();
    h.app.open_dialogue(0);
    press(&mut h.app, KeyCode::Char(' '));
    press(&mut h.app, KeyCode::Esc);
    assert_eq!(h.app.screen, Screen::Scenarios);
    assert!(!h.app.player().is_speaking());
}
