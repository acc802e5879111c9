pub mod app;
#[cfg(test)]
mod app_tests;
pub mod event;
pub mod mode;
pub mod render_state;
pub mod state;

pub use app::{App, DialogueState, StatusLevel, StatusMessage, VocabularyState, WordDetail};
pub use event::AppEvent;
pub use mode::{AppMode, DetailTab, Screen};
pub use render_state::LineView;
pub use state::AppState;
