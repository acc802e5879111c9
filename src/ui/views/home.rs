use crate::app::AppState;
use crate::content::Scenario;
use crate::ui::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn home_view<'a>(state: &AppState, today: Option<&'a Scenario>, theme: &Theme) -> Paragraph<'a> {
    let progress = state.user_progress();
    let stat = |value: String, label: &'static str| {
        vec![
            Span::styled(
                value,
                Style::default().fg(theme.anchor).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", label), theme.muted()),
            Span::raw("     "),
        ]
    };

    let mut stats = Vec::new();
    stats.extend(stat(format!("🔥 {}", progress.daily_streak), "day streak"));
    stats.extend(stat(state.saved_words().len().to_string(), "saved words"));
    stats.extend(stat(
        progress.completed_lessons.len().to_string(),
        "lessons completed",
    ));

    let mut lines = vec![
        Line::from(Span::styled("Bonjour ! Ready for today's French?", theme.title())),
        Line::from(""),
        Line::from(stats),
        Line::from(""),
        Line::from(Span::styled("Today's lesson", theme.title())),
    ];

    match today {
        Some(scenario) => {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", scenario.icon)),
                Span::styled(
                    scenario.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" - {}", scenario.name_chinese), theme.muted()),
            ]));
            lines.push(Line::from(Span::styled(
                scenario.description.clone(),
                theme.muted(),
            )));
            lines.push(Line::from(Span::styled(
                format!("{} lines · Enter to start", scenario.dialogues.len()),
                Style::default().fg(theme.accent),
            )));
        }
        None => lines.push(Line::from(Span::styled("No lessons installed", theme.muted()))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "s scenarios · v vocabulary · d dark mode · ? help · q quit",
        theme.muted(),
    )));

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Accueil "))
        .style(theme.base())
}
