use ratatui::style::{Color, Modifier, Style};

/// Screen palette; dark mode picks midnight, light mode picks daylight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    /// Follow-along highlight and brand color
    pub anchor: Color,
    pub dimmed: Color,
    pub accent: Color,
    pub warning: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::daylight()
    }
}

impl Theme {
    pub fn midnight() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38), // #1A1B26
            text: Color::Rgb(169, 177, 214),    // #A9B1D6
            anchor: Color::Rgb(247, 118, 142),  // #F7768E
            dimmed: Color::Rgb(100, 110, 150),  // #646E96
            accent: Color::Rgb(122, 162, 247),  // #7AA2F7
            warning: Color::Rgb(224, 175, 104), // #E0AF68
            success: Color::Rgb(158, 206, 106), // #9ECE6A
        }
    }

    pub fn daylight() -> Self {
        Self {
            background: Color::Rgb(238, 242, 255), // #EEF2FF
            text: Color::Rgb(31, 41, 55),          // #1F2937
            anchor: Color::Rgb(37, 99, 235),       // #2563EB
            dimmed: Color::Rgb(107, 114, 128),     // #6B7280
            accent: Color::Rgb(79, 70, 229),       // #4F46E5
            warning: Color::Rgb(185, 28, 28),      // #B91C1C
            success: Color::Rgb(22, 163, 74),      // #16A34A
        }
    }

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark {
            Self::midnight()
        } else {
            Self::daylight()
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Word being spoken
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.anchor)
            .add_modifier(Modifier::BOLD)
    }

    /// Word under the keyboard cursor
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    }
}
