use crate::language::Language;

/// Which view the shell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Translator,
    Breakdown,
}

impl Route {
    pub fn name(self) -> &'static str {
        match self {
            Route::Translator => "translator",
            Route::Breakdown => "breakdown",
        }
    }
}

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text for the active view: translate it or look it up
    Submit(String),
    Swap,
    Navigate(Route),
    SetSource(Language),
    SetTarget(Language),
    History,
    Help,
    Quit,
    /// Blank line
    Nothing,
    /// A `:command` that could not be understood
    Invalid(String),
}

impl Command {
    /// Parse a line. Lines starting with `:` are commands; anything else is input.
    pub fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Nothing;
        }
        let Some(command) = trimmed.strip_prefix(':') else {
            return Command::Submit(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let argument = parts.next();

        match (name.as_str(), argument) {
            ("t" | "translate" | "translator", None) => Command::Navigate(Route::Translator),
            ("b" | "breakdown", None) => Command::Navigate(Route::Breakdown),
            ("s" | "swap", None) => Command::Swap,
            ("h" | "history", None) => Command::History,
            ("?" | "help", None) => Command::Help,
            ("q" | "quit" | "exit", None) => Command::Quit,
            ("from", Some(code)) => parse_language(code).map_or_else(Command::Invalid, Command::SetSource),
            ("to", Some(code)) => parse_language(code).map_or_else(Command::Invalid, Command::SetTarget),
            ("from" | "to", None) => Command::Invalid(format!(":{} needs a language (en or ko)", name)),
            _ => Command::Invalid(format!("Unknown command ':{}' (try :help)", command)),
        }
    }
}

fn parse_language(code: &str) -> Result<Language, String> {
    code.parse::<Language>().map_err(|e| e.to_string())
}
