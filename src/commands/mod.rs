use crate::api::Transport;
use crate::error::{RestavoError, Result};
use crate::repl::Repl;
use chrono::NaiveDate;

pub mod builtin;

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Continue REPL loop
    Continue,
    /// Exit REPL loop
    Exit,
}

/// Enum representing all available REPL commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: String, password: String },
    Register { username: String, password: String },
    Logout,
    Status,
    Search { city: String, min_rating: Option<f64> },
    Favorite { hotel: String },
    Favorites,
    Book {
        hotel: String,
        dates: Option<(NaiveDate, NaiveDate)>,
    },
    Bookings,
    Cancel { booking_id: i64 },
    Analyze { booking_id: i64 },
    Chat,
    Help,
    Exit,
}

impl Command {
    /// Parse a slash command. `Ok(None)` means the line is not a command and should be
    /// sent to the assistant.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if !line.starts_with('/') {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name.to_lowercase().as_str() {
            "/login" => {
                let (username, password) = two_args(&args, "/login <user> <password>")?;
                Command::Login { username, password }
            }
            "/register" => {
                let (username, password) = two_args(&args, "/register <user> <password>")?;
                Command::Register { username, password }
            }
            "/logout" => Command::Logout,
            "/status" => Command::Status,
            "/search" => parse_search(&args)?,
            "/fav" => Command::Favorite {
                hotel: required(rest, "/fav <hotel name>")?,
            },
            "/favorites" => Command::Favorites,
            "/book" => parse_book(&args)?,
            "/bookings" => Command::Bookings,
            "/cancel" => Command::Cancel {
                booking_id: booking_id(&args, "/cancel <booking id>")?,
            },
            "/analyze" => Command::Analyze {
                booking_id: booking_id(&args, "/analyze <booking id>")?,
            },
            "/chat" => Command::Chat,
            "/help" | "/?" => Command::Help,
            "/exit" | "/quit" | "/q" => Command::Exit,
            other => {
                return Err(RestavoError::Validation(format!(
                    "Unknown command '{}'. Type /help to see what's available.",
                    other
                )))
            }
        };

        Ok(Some(command))
    }

    pub async fn execute<T: Transport>(self, repl: &mut Repl<T>) -> Result<CommandResult> {
        match self {
            Command::Login { username, password } => {
                builtin::login_command(repl, &username, &password).await
            }
            Command::Register { username, password } => {
                builtin::register_command(repl, &username, &password).await
            }
            Command::Logout => builtin::logout_command(repl).await,
            Command::Status => builtin::status_command(repl).await,
            Command::Search { city, min_rating } => {
                builtin::search_command(repl, &city, min_rating)
            }
            Command::Favorite { hotel } => builtin::favorite_command(repl, &hotel).await,
            Command::Favorites => builtin::favorites_command(repl).await,
            Command::Book { hotel, dates } => builtin::book_command(repl, &hotel, dates).await,
            Command::Bookings => builtin::bookings_command(repl).await,
            Command::Cancel { booking_id } => builtin::cancel_command(repl, booking_id).await,
            Command::Analyze { booking_id } => builtin::analyze_command(repl, booking_id).await,
            Command::Chat => builtin::chat_command(repl),
            Command::Help => builtin::help_command(),
            Command::Exit => builtin::exit_command(),
        }
    }
}

fn usage(text: &str) -> RestavoError {
    RestavoError::Validation(format!("Usage: {}", text))
}

fn required(rest: &str, usage_text: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(usage(usage_text));
    }
    Ok(rest.to_string())
}

fn two_args(args: &[&str], usage_text: &str) -> Result<(String, String)> {
    match args {
        [first, second] => Ok((first.to_string(), second.to_string())),
        _ => Err(usage(usage_text)),
    }
}

fn booking_id(args: &[&str], usage_text: &str) -> Result<i64> {
    match args {
        [id] => id
            .trim_start_matches('#')
            .parse()
            .map_err(|_| usage(usage_text)),
        _ => Err(usage(usage_text)),
    }
}

/// City names may contain spaces; a trailing number is the minimum rating.
fn parse_search(args: &[&str]) -> Result<Command> {
    let (city_words, min_rating) = match args.split_last() {
        Some((last, init)) if !init.is_empty() => match last.parse::<f64>() {
            Ok(rating) => (init, Some(rating)),
            Err(_) => (args, None),
        },
        _ => (args, None),
    };

    if city_words.is_empty() {
        return Err(usage("/search <city> [min rating]"));
    }
    if let Some(rating) = min_rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(RestavoError::Validation(format!(
                "Minimum rating must be between 0 and 5, got {}",
                rating
            )));
        }
    }

    Ok(Command::Search {
        city: city_words.join(" "),
        min_rating,
    })
}

/// Hotel names may contain spaces; two trailing `YYYY-MM-DD` tokens are the stay dates.
fn parse_book(args: &[&str]) -> Result<Command> {
    let usage_text = "/book <hotel name> [check-in check-out]";

    let dates = match args {
        [.., check_in, check_out] if args.len() > 2 => {
            match (parse_date(check_in), parse_date(check_out)) {
                (Some(check_in), Some(check_out)) => Some((check_in, check_out)),
                _ => None,
            }
        }
        _ => None,
    };

    let hotel_words = match dates {
        Some(_) => &args[..args.len() - 2],
        None => args,
    };
    if hotel_words.is_empty() {
        return Err(usage(usage_text));
    }

    Ok(Command::Book {
        hotel: hotel_words.join(" "),
        dates,
    })
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// All available commands with a one-line description (for /help)
pub static COMMANDS: &[(&str, &str)] = &[
    ("/login <user> <password>", "Sign in"),
    ("/register <user> <password>", "Create an account"),
    ("/logout", "Sign out"),
    ("/status", "Show who is signed in"),
    ("/search <city> [min rating]", "Compare prices for hotels in a city"),
    ("/fav <hotel name>", "Add or remove a favorite"),
    ("/favorites", "List your favorite hotels"),
    ("/book <hotel name> [check-in check-out]", "Book at the cheapest price"),
    ("/bookings", "List your bookings"),
    ("/cancel <booking id>", "Cancel a booking"),
    ("/analyze <booking id>", "Get an assistant review of a booking"),
    ("/chat", "Show the conversation with the assistant"),
    ("/help", "Show this list"),
    ("/exit", "Quit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(Command::parse("where should I go in May?").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("/exit").unwrap(), Some(Command::Exit));
        assert_eq!(Command::parse("/Q").unwrap(), Some(Command::Exit));
        assert_eq!(Command::parse("/favorites").unwrap(), Some(Command::Favorites));
        assert_eq!(Command::parse("  /logout ").unwrap(), Some(Command::Logout));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(matches!(
            Command::parse("/dance"),
            Err(RestavoError::Validation(_))
        ));
    }

    #[test]
    fn test_login_needs_two_args() {
        assert_eq!(
            Command::parse("/login amal secret").unwrap(),
            Some(Command::Login {
                username: "amal".to_string(),
                password: "secret".to_string()
            })
        );
        assert!(Command::parse("/login amal").is_err());
    }

    #[test]
    fn test_search_with_multi_word_city() {
        assert_eq!(
            Command::parse("/search Sharm El Sheikh 4.5").unwrap(),
            Some(Command::Search {
                city: "Sharm El Sheikh".to_string(),
                min_rating: Some(4.5)
            })
        );
        assert_eq!(
            Command::parse("/search Abu Dhabi").unwrap(),
            Some(Command::Search {
                city: "Abu Dhabi".to_string(),
                min_rating: None
            })
        );
        assert!(Command::parse("/search").is_err());
        assert!(Command::parse("/search Cairo 7").is_err());
    }

    #[test]
    fn test_single_numeric_search_arg_is_a_city() {
        assert_eq!(
            Command::parse("/search 4").unwrap(),
            Some(Command::Search {
                city: "4".to_string(),
                min_rating: None
            })
        );
    }

    #[test]
    fn test_book_with_and_without_dates() {
        assert_eq!(
            Command::parse("/book Palm Beach Hotel 2026-11-02 2026-11-05").unwrap(),
            Some(Command::Book {
                hotel: "Palm Beach Hotel".to_string(),
                dates: Some((
                    NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
                    NaiveDate::from_ymd_opt(2026, 11, 5).unwrap()
                )),
            })
        );
        assert_eq!(
            Command::parse("/book Palm Beach Hotel").unwrap(),
            Some(Command::Book {
                hotel: "Palm Beach Hotel".to_string(),
                dates: None,
            })
        );
        assert!(Command::parse("/book").is_err());
    }

    #[test]
    fn test_booking_id_args() {
        assert_eq!(
            Command::parse("/cancel 12").unwrap(),
            Some(Command::Cancel { booking_id: 12 })
        );
        assert_eq!(
            Command::parse("/analyze #3").unwrap(),
            Some(Command::Analyze { booking_id: 3 })
        );
        assert!(Command::parse("/cancel twelve").is_err());
        assert!(Command::parse("/cancel").is_err());
    }
}
