//! Line command parsing

use taskify_core::task::{TaskId, TaskPriority};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <priority> <title>`
    Add {
        priority: Option<TaskPriority>,
        title: String,
    },
    /// `edit <id> <title>`
    Edit { id: TaskId, title: String },
    /// `priority <id> <level>`
    Priority {
        id: TaskId,
        priority: Option<TaskPriority>,
    },
    /// `done <id>` / `undo <id>`
    SetCompleted { id: TaskId, completed: bool },
    /// `rm <id>`
    Remove { id: TaskId },
    /// `search [text]`; no text clears the filter
    Search(String),
    List,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs a task id")]
    MissingId(&'static str),

    #[error("'{0}' is not a task id")]
    BadId(String),
}

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim_start();
        let (word, rest) = split_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "add" | "a" => {
                let (first, title) = split_word(rest);
                match first.parse::<TaskPriority>() {
                    Ok(priority) => Command::Add {
                        priority: Some(priority),
                        title: title.to_string(),
                    },
                    Err(_) => Command::Add {
                        priority: None,
                        title: rest.to_string(),
                    },
                }
            }
            "edit" | "e" => {
                let (id, title) = parse_id("edit", rest)?;
                Command::Edit {
                    id,
                    title: title.to_string(),
                }
            }
            "priority" | "p" => {
                let (id, level) = parse_id("priority", rest)?;
                Command::Priority {
                    id,
                    priority: level.parse().ok(),
                }
            }
            "done" | "d" => Command::SetCompleted {
                id: parse_id("done", rest)?.0,
                completed: true,
            },
            "undo" | "u" => Command::SetCompleted {
                id: parse_id("undo", rest)?.0,
                completed: false,
            },
            "rm" | "delete" => Command::Remove {
                id: parse_id("rm", rest)?.0,
            },
            "search" | "s" | "/" => Command::Search(rest.to_string()),
            "list" | "ls" => Command::List,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

fn parse_id<'a>(command: &'static str, input: &'a str) -> Result<(TaskId, &'a str), CommandError> {
    let (word, rest) = split_word(input);
    if word.is_empty() {
        return Err(CommandError::MissingId(command));
    }
    let id = word
        .trim_start_matches('#')
        .parse::<TaskId>()
        .map_err(|_| CommandError::BadId(word.to_string()))?;
    Ok((id, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_add_with_priority() {
        assert_eq!(
            parse("add high Call the bank"),
            Command::Add {
                priority: Some(TaskPriority::High),
                title: "Call the bank".to_string()
            }
        );
    }

    #[test]
    fn test_add_without_priority_keeps_whole_title() {
        assert_eq!(
            parse("add Buy milk"),
            Command::Add {
                priority: None,
                title: "Buy milk".to_string()
            }
        );
    }

    #[test]
    fn test_id_commands() {
        assert_eq!(
            parse("edit #3 Buy oat milk"),
            Command::Edit {
                id: 3,
                title: "Buy oat milk".to_string()
            }
        );
        assert_eq!(
            parse("p 2 LOW"),
            Command::Priority {
                id: 2,
                priority: Some(TaskPriority::Low)
            }
        );
        assert_eq!(
            parse("done 7"),
            Command::SetCompleted {
                id: 7,
                completed: true
            }
        );
        assert_eq!(parse("rm 7"), Command::Remove { id: 7 });
    }

    #[test]
    fn test_search_keeps_raw_text() {
        assert_eq!(parse("search milk "), Command::Search("milk ".to_string()));
        assert_eq!(parse("search"), Command::Search(String::new()));
    }

    #[test]
    fn test_blank_line_is_nothing() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Command::parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(Command::parse("done"), Err(CommandError::MissingId("done")));
        assert_eq!(
            Command::parse("rm seven"),
            Err(CommandError::BadId("seven".to_string()))
        );
    }
}
