//! Interactive command parsing.
//!
//! Each line typed at the prompt becomes a [`Command`], which is then turned
//! into the actions to send to the store.

use crate::types::{TaskAction, TaskId, TaskState};
use thiserror::Error;

/// Help text printed by the `help` command
pub const HELP: &str = "\
Commands:
  type <text>    set the add field
  add [text]     add the add field (or <text>) as a new task
  toggle <id>    mark a task done or not done
  delete <id>    delete a task
  reload         fetch all tasks again
  list           show the list
  clear          empty the add field and hide the error
  help           show this help
  quit           exit";

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the add field
    Type(String),
    /// Add a task, optionally typing its text first
    Add(Option<String>),
    /// Toggle a task
    Toggle(TaskId),
    /// Delete a task
    Delete(TaskId),
    /// Fetch everything again
    Reload,
    /// Print the list
    List,
    /// Empty the add field and dismiss the error
    Clear,
    /// Print help
    Help,
    /// Exit
    Quit,
}

/// A prompt line that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing was typed
    #[error("empty command")]
    Empty,

    /// First word is not a command
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    /// A command that needs an id got none
    #[error("'{0}' needs a task id")]
    MissingId(&'static str),

    /// The id is not an integer
    #[error("'{0}' is not a task id")]
    InvalidId(String),

    /// The id is not in the list
    #[error("no task with id {0}")]
    UnknownTask(TaskId),
}

impl std::str::FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "type" => Ok(Self::Type(rest.to_string())),
            "add" => {
                if rest.trim().is_empty() {
                    Ok(Self::Add(None))
                } else {
                    Ok(Self::Add(Some(rest.to_string())))
                }
            },
            "toggle" => parse_id("toggle", rest).map(Self::Toggle),
            "delete" | "rm" => parse_id("delete", rest).map(Self::Delete),
            "reload" => Ok(Self::Reload),
            "list" | "ls" => Ok(Self::List),
            "clear" => Ok(Self::Clear),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(ParseError::UnknownCommand(word.to_string())),
        }
    }
}

fn parse_id(command: &'static str, rest: &str) -> Result<TaskId, ParseError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(ParseError::MissingId(command));
    }
    raw.parse::<i64>()
        .map(TaskId::new)
        .map_err(|_| ParseError::InvalidId(raw.to_string()))
}

impl Command {
    /// Actions to send for this command, given the current state
    ///
    /// Toggling reads the task's current flag from `state`. Commands handled
    /// by the prompt itself (`list`, `help`, `quit`) produce no action.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnknownTask` when toggling an id that is not in
    /// the list.
    pub fn into_actions(self, state: &TaskState) -> Result<Vec<TaskAction>, ParseError> {
        let actions = match self {
            Self::Type(text) => vec![TaskAction::InputChanged { text }],
            Self::Add(None) => vec![TaskAction::AddTask],
            Self::Add(Some(text)) => vec![TaskAction::InputChanged { text }, TaskAction::AddTask],
            Self::Toggle(id) => {
                let task = state.get(id).ok_or(ParseError::UnknownTask(id))?;
                vec![TaskAction::ToggleTask {
                    id,
                    completed: task.completed,
                }]
            },
            Self::Delete(id) => vec![TaskAction::DeleteTask { id }],
            Self::Reload => vec![TaskAction::Reload],
            Self::Clear => vec![
                TaskAction::InputChanged {
                    text: String::new(),
                },
                TaskAction::DismissError,
            ],
            Self::List | Self::Help | Self::Quit => Vec::new(),
        };
        Ok(actions)
    }
}
