// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{AppState, Page},
    theme::Theme,
};
use stayboard_core::RatingRange;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    // Change theme
    Theme(String),
    Page(Page),
    // Set the rating range directly; ends may be given in either order
    Rating(RatingRange),
    // Drop every filter
    Clear,
    // Toggle one city / amenity by name
    City(String),
    Amenity(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "page" => match rest {
                "1" | "overview" => Ok(Command::Page(Page::Overview)),
                "2" | "deep" | "deep-dive" | "deepdive" => Ok(Command::Page(Page::DeepDive)),
                _ => Err("usage: page <overview|deep>".to_string()),
            },
            "rating" => {
                let usage = || "usage: rating <lo> <hi>".to_string();
                let mut parts = rest.split_whitespace().map(str::parse::<f64>);
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(Ok(lo)), Some(Ok(hi)), None) if lo.is_finite() && hi.is_finite() => {
                        Ok(Command::Rating(RatingRange::new(lo, hi)))
                    }
                    _ => Err(usage()),
                }
            }
            "city" if !rest.is_empty() => Ok(Command::City(rest.to_string())),
            "city" => Err("usage: city <name>".to_string()),
            "amenity" if !rest.is_empty() => Ok(Command::Amenity(rest.to_string())),
            "amenity" => Err("usage: amenity <name>".to_string()),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Page(page) => {
            s.page = page;
        }
        Command::Rating(range) => {
            s.filters.rating = Some(range);
            s.recompute();
        }
        Command::Clear => {
            s.filters.clear();
            s.recompute();
        }
        Command::City(name) => {
            s.filters.toggle_city(&name);
            s.recompute();
        }
        Command::Amenity(name) => {
            s.filters.toggle_amenity(&name);
            s.recompute();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
