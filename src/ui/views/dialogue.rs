use crate::app::{DialogueState, LineView};
use crate::content::{DialogueLine, Scenario};
use crate::storage::{SpeechRate, SpeechSettings};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const BAR_WIDTH: usize = 20;

pub fn render_progress_bar(progress: (usize, usize), theme: &Theme) -> Line<'static> {
    let (current, total) = progress;
    let filled_len = if total == 0 {
        0
    } else {
        (current.min(total) * BAR_WIDTH) / total
    };
    let empty_len = BAR_WIDTH - filled_len;

    Line::from(vec![
        Span::styled("━".repeat(filled_len), Style::default().fg(theme.anchor)),
        Span::styled("─".repeat(empty_len), theme.muted()),
    ])
    .alignment(Alignment::Center)
}

/// The French line, one span per token. The spoken word wins over the
/// keyboard selection when both land on the same token.
pub fn line_spans(view: &LineView, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span<'static>> = view
        .tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let style = if view.highlighted == Some(i) {
                theme.highlight()
            } else if view.selected == Some(i) {
                theme.selected()
            } else if token.is_clickable() {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Span::styled(token.text.clone(), style)
        })
        .collect();
    Line::from(spans)
}

fn settings_lines(settings: SpeechSettings, theme: &Theme) -> Vec<Line<'static>> {
    let follow = if settings.follow_along { "on" } else { "off" };
    let mut rates = vec![Span::styled("Rate (r): ", theme.muted())];
    for rate in SpeechRate::ALL {
        let style = if rate == settings.rate {
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            theme.muted()
        };
        rates.push(Span::styled(format!(" {} ", rate), style));
        rates.push(Span::raw(" "));
    }
    vec![
        Line::from(Span::styled("Playback settings", theme.title())),
        Line::from(vec![
            Span::styled("Follow-along (f): ", theme.muted()),
            Span::styled(follow, Style::default().fg(theme.accent)),
        ]),
        Line::from(rates),
    ]
}

pub fn dialogue_view(
    scenario: &Scenario,
    line: &DialogueLine,
    dialogue: &DialogueState,
    settings: SpeechSettings,
    speaking: bool,
    theme: &Theme,
) -> Paragraph<'static> {
    let total = scenario.dialogues.len();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} {}", scenario.icon, scenario.name), theme.title()),
            Span::styled(
                format!(
                    "  {}   {} / {}",
                    scenario.translated_name(dialogue.lang),
                    dialogue.line + 1,
                    total
                ),
                theme.muted(),
            ),
        ]),
        render_progress_bar((dialogue.line + 1, total), theme),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}:", line.speaker),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        line_spans(&dialogue.view, theme),
        Line::from(""),
    ];

    if dialogue.show_translation {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", dialogue.lang.label()), theme.muted()),
            Span::styled(line.translation(dialogue.lang).to_string(), theme.muted()),
        ]));
        lines.push(Line::from(""));
    }

    if dialogue.show_settings {
        lines.extend(settings_lines(settings, theme));
        lines.push(Line::from(""));
    }

    let play = if speaking { "Space stop" } else { "Space play" };
    lines.push(Line::from(Span::styled(
        format!(
            "{} · ←/→ word · Enter look up · n/p line · t translation · c language · s settings · Esc back",
            play
        ),
        theme.muted(),
    )));

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Dialogue "))
        .style(theme.base())
}
