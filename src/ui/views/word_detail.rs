use crate::app::{DetailTab, WordDetail};
use crate::content::TranslationLang;
use crate::ui::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn tab_bar(active: DetailTab, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, tab) in DetailTab::ALL.iter().enumerate() {
        let style = if *tab == active {
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            theme.muted()
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn definition_lines(detail: &WordDetail, theme: &Theme) -> Vec<Line<'static>> {
    let word = &detail.word;
    let mut lines = vec![Line::from(Span::styled(
        word.translation(detail.lang).to_string(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ))];
    if !word.example.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Example", theme.title())));
        lines.push(Line::from(Span::raw(word.example.clone())));
        lines.push(Line::from(Span::styled(
            word.example_translation(detail.lang).to_string(),
            theme.muted(),
        )));
    }
    lines
}

fn grammar_lines(detail: &WordDetail, theme: &Theme) -> Vec<Line<'static>> {
    let Some(grammar) = &detail.word.grammar else {
        return vec![Line::from(Span::styled(
            "No grammar notes for this word",
            theme.muted(),
        ))];
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Type: ", theme.muted()),
        Span::raw(grammar.word_type.label()),
    ])];
    if let Some(gender) = grammar.gender {
        lines.push(Line::from(vec![
            Span::styled("Gender: ", theme.muted()),
            Span::raw(gender.label()),
        ]));
    }
    if let Some(notes) = grammar.notes_in(detail.lang) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::raw(notes.to_string())));
    }
    lines
}

fn conjugation_lines(detail: &WordDetail, theme: &Theme) -> Vec<Line<'static>> {
    let tenses = detail
        .word
        .conjugation
        .as_ref()
        .map(|c| c.tenses())
        .unwrap_or_default();
    if tenses.is_empty() {
        return vec![Line::from(Span::styled(
            "No conjugation table for this word",
            theme.muted(),
        ))];
    }

    let mut lines = Vec::new();
    for (label, forms) in tenses {
        lines.push(Line::from(Span::styled(label, theme.title())));
        for pair in forms.chunks(2) {
            let text = pair
                .iter()
                .map(|f| format!("{:<24}", f))
                .collect::<String>();
            lines.push(Line::from(Span::raw(format!("  {}", text.trim_end()))));
        }
    }
    lines
}

pub fn word_detail_view(detail: &WordDetail, saved: bool, theme: &Theme) -> Paragraph<'static> {
    let word = &detail.word;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                word.french.clone(),
                Style::default().fg(theme.anchor).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", word.phonetic), theme.muted()),
        ]),
        tab_bar(detail.tab, theme),
        Line::from(""),
    ];

    lines.extend(match detail.tab {
        DetailTab::Definition => definition_lines(detail, theme),
        DetailTab::Grammar => grammar_lines(detail, theme),
        DetailTab::Conjugation => conjugation_lines(detail, theme),
    });

    let other = match detail.lang {
        TranslationLang::Chinese => "English",
        TranslationLang::English => "中文",
    };
    let save = if saved {
        Span::styled("✓ saved", Style::default().fg(theme.success))
    } else {
        Span::styled("s save", Style::default().fg(theme.accent))
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        save,
        Span::styled(
            format!(" · p pronounce · Tab/1-3 tabs · c {} · Esc close", other),
            theme.muted(),
        ),
    ]));

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Mot "))
        .style(theme.base())
}
