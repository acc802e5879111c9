use crate::app::{App, AppMode, Screen, StatusLevel};
use crate::ui::theme::Theme;
use crate::ui::views::{
    centered_rect, dialogue::dialogue_view, header::header_line, help::help_view,
    home::home_view, scenarios::scenario_list, vocabulary::vocabulary_view,
    word_detail::word_detail_view,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draws one frame: header, the active screen, then the status or command
/// line. Overlays go on top.
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = Theme::for_dark_mode(app.state().dark_mode());
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(header_line(app.screen, app.current_user(), &theme)),
        chunks[0],
    );
    draw_body(frame, app, &theme, chunks[1]);
    draw_bottom_line(frame, app, &theme, chunks[2]);

    if let Some(detail) = app.detail() {
        let popup = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            word_detail_view(detail, app.state().is_word_saved(&detail.word.id), &theme),
            popup,
        );
    }

    if app.show_help() {
        let popup = centered_rect(70, 80, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(help_view(&theme), popup);
    }
}

fn draw_body(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    match app.screen {
        Screen::Home => {
            let today = app.catalog().today_scenario();
            frame.render_widget(home_view(app.state(), today, theme), area);
        }
        Screen::Scenarios => {
            frame.render_widget(
                scenario_list(
                    app.catalog().scenarios(),
                    app.state(),
                    app.scenario_cursor(),
                    theme,
                ),
                area,
            );
        }
        Screen::Dialogue => {
            if let (Some(scenario), Some(line), Some(dialogue)) =
                (app.current_scenario(), app.current_line(), app.dialogue())
            {
                frame.render_widget(
                    dialogue_view(
                        scenario,
                        line,
                        dialogue,
                        app.state().speech_settings(),
                        app.player().is_speaking(),
                        theme,
                    ),
                    area,
                );
            }
        }
        Screen::Vocabulary => {
            let matches = app.vocabulary_matches();
            frame.render_widget(
                vocabulary_view(
                    &matches,
                    app.state().saved_words().len(),
                    app.vocabulary(),
                    app.mode(),
                    theme,
                ),
                area,
            );
        }
    }
}

fn draw_bottom_line(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if app.mode() == AppMode::Command {
        let prompt = format!(":{}", app.command_input());
        let width = prompt.width() as u16;
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(prompt, Style::default().fg(theme.text)))),
            area,
        );
        frame.set_cursor_position((area.x + width.min(area.width.saturating_sub(1)), area.y));
        return;
    }

    let line = match app.status() {
        Some(status) => {
            let style = match status.level {
                StatusLevel::Info => Style::default().fg(theme.success),
                StatusLevel::Warning => Style::default().fg(theme.warning),
            };
            Line::from(Span::styled(status.text.clone(), style))
        }
        None => Line::from(Span::styled(":h help · :q quit", theme.muted())),
    };
    frame.render_widget(Paragraph::new(line), area);
}
