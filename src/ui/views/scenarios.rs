use crate::app::AppState;
use crate::content::Scenario;
use crate::ui::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Progress as a 10-cell bar.
pub fn percent_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) + 5) / 10;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

pub fn scenario_list<'a>(
    scenarios: &'a [Scenario],
    state: &AppState,
    cursor: usize,
    theme: &Theme,
) -> Paragraph<'a> {
    let mut lines = Vec::new();
    for (i, scenario) in scenarios.iter().enumerate() {
        let selected = i == cursor;
        let marker = if selected { "▶ " } else { "  " };
        let name_style = if selected {
            theme.selected()
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.anchor)),
            Span::raw(format!("{} ", scenario.icon)),
            Span::styled(scenario.name.as_str(), name_style),
            Span::styled(
                format!("  {} · {}", scenario.name_chinese, scenario.name_english),
                theme.muted(),
            ),
        ]));

        let percent = state.scenario_progress(&scenario.id);
        let mut detail = vec![
            Span::raw("    "),
            Span::styled(scenario.description.as_str(), theme.muted()),
        ];
        if percent > 0 {
            detail.push(Span::raw("  "));
            detail.push(Span::styled(
                format!("{} {}%", percent_bar(percent), percent),
                Style::default().fg(theme.success),
            ));
        }
        lines.push(Line::from(detail));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "↑/↓ choose · Enter open · Esc back",
        theme.muted(),
    )));

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Scénarios "))
        .style(theme.base())
}
