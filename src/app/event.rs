use crate::app::mode::Screen;
use crate::storage::SpeechRate;

/// Application events
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    Navigate(Screen),
    SignIn { email: String, password: String },
    Register { email: String, password: String },
    SignInGoogle,
    SignOut,
    /// `None` steps to the next offered rate
    SetRate(Option<SpeechRate>),
    ToggleFollowAlong,
    ToggleDarkMode,
    Dictionary(String),
    Quit,
    Help,
    Warning(String),
    InvalidCommand(String),
    None,
}
