use std::str::FromStr;

use crate::enums::sort::SortBy;

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Clear,
    Sort(SortBy),
    Next,
    Prev,
    Price(String),
    Refresh,
    Info,
    Help,
    Quit,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0} (try `help`)")] Unknown(String),
    #[error("`{0}` needs an argument")] MissingArgument(&'static str),
    #[error("unknown column: {0} (symbol, base, quote, price)")] UnknownColumn(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "search" | "s" | "/" => {
                // an empty search is the same as clearing it
                Ok(Command::Search(rest.to_string()))
            }
            "clear" => Ok(Command::Clear),
            "sort" | "o" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("sort"));
                }
                SortBy::from_str(rest)
                    .map(Command::Sort)
                    .map_err(|_| CommandError::UnknownColumn(rest.to_string()))
            }
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Prev),
            "price" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("price"));
                }
                Ok(Command::Price(rest.to_ascii_uppercase()))
            }
            "refresh" | "r" => Ok(Command::Refresh),
            "info" => Ok(Command::Info),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
