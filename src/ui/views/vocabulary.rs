use crate::app::{AppMode, VocabularyState};
use crate::content::Word;
use crate::ui::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn vocabulary_view(
    matches: &[&Word],
    total: usize,
    vocabulary: &VocabularyState,
    mode: AppMode,
    theme: &Theme,
) -> Paragraph<'static> {
    let searching = mode == AppMode::Search;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} saved words", total), theme.title()),
            Span::styled(format!("   [{}]", vocabulary.lang.label()), theme.muted()),
        ]),
        Line::from(vec![
            Span::styled("Search: ", theme.muted()),
            Span::styled(
                vocabulary.search.clone(),
                if searching {
                    theme.selected()
                } else {
                    Style::default().fg(theme.text)
                },
            ),
        ]),
        Line::from(""),
    ];

    if total == 0 {
        lines.push(Line::from(Span::styled(
            "No saved words yet. Open a dialogue, pick a word and press s to save it.",
            theme.muted(),
        )));
    } else if matches.is_empty() {
        lines.push(Line::from(Span::styled("No matches", theme.muted())));
    }

    for (i, word) in matches.iter().enumerate() {
        let selected = i == vocabulary.cursor;
        let marker = if selected { "▶ " } else { "  " };
        let french_style = if selected {
            theme.selected()
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.anchor)),
            Span::styled(word.french.clone(), french_style),
            Span::styled(format!("  {}", word.phonetic), theme.muted()),
            Span::raw("  "),
            Span::styled(
                word.translation(vocabulary.lang).to_string(),
                Style::default().fg(theme.text),
            ),
        ]));
        if !word.example.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", word.example),
                theme.muted(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "/ search · Enter details · p pronounce · x delete · c language · Esc back",
        theme.muted(),
    )));

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Vocabulaire "))
        .style(theme.base())
}
