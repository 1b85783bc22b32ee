//! Shell line parsing.

use thiserror::Error;
use todo_core::TodoId;

/// Something the user asked the board to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Add(String),
    Toggle(TodoId),
    Edit(TodoId, String),
    Delete(TodoId),
}

/// One line typed into the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Act(Action),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for a list")]
    UnknownVerb(String),
    #[error("`{verb}` needs {what}")]
    MissingArgument { verb: &'static str, what: &'static str },
    #[error("{0:?} is not a todo id")]
    BadId(String),
}

pub const HELP: &str = "\
commands:
  list                 refresh and show all todos
  add <text>           add a todo
  toggle <id>          flip completed/pending
  edit <id> <text>     replace a todo's text
  delete <id>          remove a todo
  help                 show this text
  quit                 leave the shell";

/// Parse a shell line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Line>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let parsed = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => Line::Act(Action::List),
        "add" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    verb: "add",
                    what: "some text",
                });
            }
            Line::Act(Action::Add(rest.to_string()))
        }
        "toggle" | "done" => Line::Act(Action::Toggle(parse_id("toggle", rest)?)),
        "delete" | "rm" => Line::Act(Action::Delete(parse_id("delete", rest)?)),
        "edit" => {
            let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let id = parse_id("edit", id)?;
            // Blank text is passed through; the board decides what it means.
            Line::Act(Action::Edit(id, text.trim().to_string()))
        }
        "help" | "?" => Line::Help,
        "quit" | "exit" | "q" => Line::Quit,
        _ => return Err(CommandError::UnknownVerb(verb.to_string())),
    };
    Ok(Some(parsed))
}

fn parse_id(verb: &'static str, raw: &str) -> Result<TodoId, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument { verb, what: "an id" });
    }
    let raw = raw.trim_start_matches('#');
    raw.parse().map_err(|_| CommandError::BadId(raw.to_string()))
}
