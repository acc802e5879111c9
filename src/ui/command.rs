//! Command line parsing
//!
//! Input typed after `:` on any screen:
//! - `:q` / `:quit`, `:h` / `:help`
//! - `:login <email> <password>`, `:register <email> <password>`, `:google`, `:logout`
//! - `:rate [0.25|0.5|0.75|1]` (no value steps to the next rate), `:follow`, `:dark`
//! - `:dict <word>` exact dictionary lookup
//! - `:home`, `:scenarios`, `:vocab`

use crate::app::mode::Screen;
use crate::app::AppEvent;
use crate::storage::SpeechRate;

/// Commands that can be parsed from command line input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Login { email: String, password: String },
    Register { email: String, password: String },
    Google,
    Logout,
    Rate(Option<SpeechRate>),
    Follow,
    Dark,
    Dict(String),
    Go(Screen),
    Usage(&'static str),
    Unknown(String),
}

fn credentials(args: &[&str]) -> Option<(String, String)> {
    match args {
        [email, password] => Some((email.to_string(), password.to_string())),
        _ => None,
    }
}

/// Parse command line input into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    let Some(body) = input.strip_prefix(':') else {
        return Command::Unknown(input.to_string());
    };

    let mut parts = body.split_whitespace();
    let Some(name) = parts.next() else {
        return Command::Unknown(input.to_string());
    };
    let args: Vec<&str> = parts.collect();

    match name {
        "q" | "quit" => Command::Quit,
        "h" | "help" => Command::Help,
        "login" => match credentials(&args) {
            Some((email, password)) => Command::Login { email, password },
            None => Command::Usage(":login <email> <password>"),
        },
        "register" => match credentials(&args) {
            Some((email, password)) => Command::Register { email, password },
            None => Command::Usage(":register <email> <password>"),
        },
        "google" => Command::Google,
        "logout" => Command::Logout,
        "rate" => match args.as_slice() {
            [] => Command::Rate(None),
            [value] => match value.parse::<f64>().ok().and_then(SpeechRate::from_value) {
                Some(rate) => Command::Rate(Some(rate)),
                None => Command::Usage(":rate [0.25|0.5|0.75|1]"),
            },
            _ => Command::Usage(":rate [0.25|0.5|0.75|1]"),
        },
        "follow" => Command::Follow,
        "dark" => Command::Dark,
        "dict" => {
            if args.is_empty() {
                Command::Usage(":dict <word>")
            } else {
                Command::Dict(args.join(" "))
            }
        }
        "home" => Command::Go(Screen::Home),
        "scenarios" => Command::Go(Screen::Scenarios),
        "vocab" => Command::Go(Screen::Vocabulary),
        _ => Command::Unknown(input.to_string()),
    }
}

/// Convert a parsed command into an AppEvent
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::Login { email, password } => AppEvent::SignIn { email, password },
        Command::Register { email, password } => AppEvent::Register { email, password },
        Command::Google => AppEvent::SignInGoogle,
        Command::Logout => AppEvent::SignOut,
        Command::Rate(rate) => AppEvent::SetRate(rate),
        Command::Follow => AppEvent::ToggleFollowAlong,
        Command::Dark => AppEvent::ToggleDarkMode,
        Command::Dict(word) => AppEvent::Dictionary(word),
        Command::Go(screen) => AppEvent::Navigate(screen),
        Command::Usage(usage) => AppEvent::Warning(format!("usage: {}", usage)),
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit_variants() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":quit"), Command::Quit);
    }

    #[test]
    fn test_parse_help_variants() {
        assert_eq!(parse_command(":h"), Command::Help);
        assert_eq!(parse_command("  :help "), Command::Help);
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse_command(":login marie@example.fr secret1"),
            Command::Login {
                email: "marie@example.fr".to_string(),
                password: "secret1".to_string()
            }
        );
        assert!(matches!(parse_command(":login marie@example.fr"), Command::Usage(_)));
    }

    #[test]
    fn test_parse_register_needs_two_args() {
        assert!(matches!(parse_command(":register a b c"), Command::Usage(_)));
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_command(":rate"), Command::Rate(None));
        assert_eq!(parse_command(":rate 0.5"), Command::Rate(Some(SpeechRate::Half)));
        assert_eq!(parse_command(":rate 1"), Command::Rate(Some(SpeechRate::Normal)));
        assert!(matches!(parse_command(":rate 2"), Command::Usage(_)));
        assert!(matches!(parse_command(":rate fast"), Command::Usage(_)));
    }

    #[test]
    fn test_parse_dict_keeps_phrase() {
        assert_eq!(
            parse_command(":dict aller-retour"),
            Command::Dict("aller-retour".to_string())
        );
        assert!(matches!(parse_command(":dict"), Command::Usage(_)));
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_command(":home"), Command::Go(Screen::Home));
        assert_eq!(parse_command(":vocab"), Command::Go(Screen::Vocabulary));
        assert_eq!(parse_command(":scenarios"), Command::Go(Screen::Scenarios));
    }

    #[test]
    fn test_parse_toggles() {
        assert_eq!(parse_command(":google"), Command::Google);
        assert_eq!(parse_command(":logout"), Command::Logout);
        assert_eq!(parse_command(":follow"), Command::Follow);
        assert_eq!(parse_command(":dark"), Command::Dark);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_command(""), Command::Unknown(_)));
        assert!(matches!(parse_command(":"), Command::Unknown(_)));
    }

    #[test]
    fn test_parse_invalid_command() {
        assert!(matches!(parse_command("invalid"), Command::Unknown(_)));
        assert!(matches!(parse_command(":fly"), Command::Unknown(_)));
    }

    #[test]
    fn test_command_to_app_event_quit() {
        assert_eq!(command_to_app_event(Command::Quit), AppEvent::Quit);
    }

    #[test]
    fn test_command_to_app_event_usage_is_warning() {
        let event = command_to_app_event(Command::Usage(":dict <word>"));
        assert_eq!(event, AppEvent::Warning("usage: :dict <word>".to_string()));
    }

    #[test]
    fn test_command_to_app_event_unknown() {
        let event = command_to_app_event(Command::Unknown(":fly".to_string()));
        assert!(matches!(event, AppEvent::InvalidCommand(_)));
    }

    #[test]
    fn test_command_to_app_event_rate() {
        let event = command_to_app_event(Command::Rate(Some(SpeechRate::Quarter)));
        assert_eq!(event, AppEvent::SetRate(Some(SpeechRate::Quarter)));
    }
}
