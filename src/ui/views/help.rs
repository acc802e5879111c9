use crate::ui::theme::Theme;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const COMMANDS: [(&str, &str); 13] = [
    (":q", "quit"),
    (":h", "this help"),
    (":home  :scenarios  :vocab", "switch screen"),
    (":login <email> <password>", "sign in"),
    (":register <email> <password>", "create an account"),
    (":google", "sign in with the Google account set in [auth]"),
    (":logout", "sign out"),
    (":rate [0.25|0.5|0.75|1]", "speech rate (no value: next rate)"),
    (":follow", "toggle follow-along highlight"),
    (":dark", "toggle dark mode"),
    (":dict <word>", "look a word up in the dictionary"),
    ("Space", "play or stop the current line"),
    ("Enter", "open the selected word"),
];

pub fn help_view(theme: &Theme) -> Paragraph<'static> {
    let mut lines = vec![Line::from(Span::styled("Commands", theme.title())), Line::from("")];
    for (keys, what) in COMMANDS {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<32}", keys), theme.selected()),
            Span::styled(what, theme.muted()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press any key to close", theme.muted())));

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Aide "))
        .style(theme.base())
}
