use crate::app::Screen;
use crate::auth::User;
use crate::ui::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

pub const APP_NAME: &str = "VoLaLa";

/// Brand, current screen and the avatar initial (or a sign-in hint).
pub fn header_line(screen: Screen, user: Option<&User>, theme: &Theme) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(theme.anchor).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("· {}", screen.title()), theme.muted()),
        Span::raw("   "),
    ];

    match user {
        Some(user) => {
            spans.push(Span::styled(
                format!(" {} ", user.initial()),
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(" {}", user.label()), theme.muted()));
        }
        None => spans.push(Span::styled(
            ":login <email> <password> · :register · :google",
            theme.muted(),
        )),
    }

    Line::from(spans)
}
