/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Single-key shortcuts for the current screen
    Normal,
    /// Typing after `:`
    Command,
    /// Typing a vocabulary search term
    Search,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Scenarios,
    Dialogue,
    Vocabulary,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Accueil",
            Screen::Scenarios => "Scénarios",
            Screen::Dialogue => "Dialogue",
            Screen::Vocabulary => "Vocabulaire",
        }
    }
}

/// Tabs of the word detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Definition,
    Grammar,
    Conjugation,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [DetailTab::Definition, DetailTab::Grammar, DetailTab::Conjugation];

    pub fn next(self) -> Self {
        match self {
            DetailTab::Definition => DetailTab::Grammar,
            DetailTab::Grammar => DetailTab::Conjugation,
            DetailTab::Conjugation => DetailTab::Definition,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Definition => "Definition",
            DetailTab::Grammar => "Grammar",
            DetailTab::Conjugation => "Conjugation",
        }
    }
}
