//! Parsing of the frontend's line commands.

use std::str::FromStr;

use thiserror::Error;

pub const HELP: &str = "\
commands:
  add <title>     add a to-do
  toggle <n>      flip completed on item n
  edit <n>        start editing item n
  title <text>    replace the title being edited
  save            save the edit (an empty title cancels)
  cancel          leave edit mode without saving
  delete <n>      delete item n (asks for confirmation)
  reload          fetch the list again
  help            show this text
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(usize),
    Edit(usize),
    Title(String),
    Save,
    Cancel,
    Delete(usize),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not an item number")]
    BadPosition(String),

    #[error("there is no item {0}")]
    NoSuchItem(usize),

    #[error("not editing anything")]
    NotEditing,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "add" | "a" => Ok(Command::Add(rest.to_string())),
            "toggle" | "t" => position("toggle", rest).map(Command::Toggle),
            "edit" | "e" => position("edit", rest).map(Command::Edit),
            // the edit buffer may legitimately be blank
            "title" => Ok(Command::Title(rest.to_string())),
            "save" | "s" => Ok(Command::Save),
            "cancel" | "esc" => Ok(Command::Cancel),
            "delete" | "d" => position("delete", rest).map(Command::Delete),
            "reload" | "r" => Ok(Command::Reload),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn position(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadPosition(arg.to_string())),
    }
}

/// Answer to the delete confirmation prompt; anything but yes declines.
pub fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
