//! Viewer commands issued by the shell

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// A user action on the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    ToggleShuffle,
    Shuffle(bool),
    Current,
    List,
    History,
    Open(Vec<PathBuf>),
    Add(Vec<PathBuf>),
    OpenDirectory { path: PathBuf, include_subdirs: bool },
    OpenRecent(usize),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument for {command}: {value}")]
    InvalidArgument { command: &'static str, value: String },

    #[error("Unterminated quote")]
    UnterminatedQuote,
}

/// One line of help per command
///
/// Arguments are separated by whitespace; quote a path that contains spaces.
pub const HELP: &[(&str, &str)] = &[
    ("n, next, right", "show the next image"),
    ("p, prev, left", "show the previous image"),
    ("first / last", "jump to the first or last position"),
    ("r, shuffle [on|off]", "toggle or set shuffle mode"),
    ("c, current", "print the current image"),
    ("ls, list", "print the image list"),
    ("history", "print recent directories"),
    ("open <path>...", "replace the list with files or directories"),
    ("add <path>...", "add files to the list"),
    ("dir [-r] <path>", "open a directory, -r includes subdirectories"),
    ("recent <n>", "reopen recent directory n"),
    ("h, help", "show this help"),
    ("q, quit", "save and exit"),
    ("\"a b/c.png\"", "quote paths that contain spaces"),
];

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = split_args(line)?;
        let (name, args) = words.split_first().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let command = match name.to_lowercase().as_str() {
            "n" | "next" | "right" => Command::Next,
            "p" | "prev" | "previous" | "left" => Command::Previous,
            "first" | "home" => Command::First,
            "last" | "end" => Command::Last,
            "r" | "shuffle" => match args.first().copied() {
                None => Command::ToggleShuffle,
                Some("on") => Command::Shuffle(true),
                Some("off") => Command::Shuffle(false),
                Some(other) => {
                    return Err(CommandError::InvalidArgument {
                        command: "shuffle",
                        value: other.to_string(),
                    })
                }
            },
            "c" | "current" => Command::Current,
            "ls" | "list" => Command::List,
            "history" => Command::History,
            "open" => Command::Open(paths(&args, "open")?),
            "add" => Command::Add(paths(&args, "add")?),
            "dir" => {
                let include_subdirs = args.first() == Some(&"-r");
                let rest = if include_subdirs { &args[1..] } else { &args[..] };
                match rest {
                    [] => return Err(CommandError::MissingArgument("dir")),
                    [path] => Command::OpenDirectory {
                        path: PathBuf::from(path),
                        include_subdirs,
                    },
                    [_, extra, ..] => {
                        return Err(CommandError::InvalidArgument {
                            command: "dir",
                            value: extra.to_string(),
                        })
                    }
                }
            }
            "recent" => {
                let value = args.first().ok_or(CommandError::MissingArgument("recent"))?;
                let n = value.parse::<usize>().map_err(|_| CommandError::InvalidArgument {
                    command: "recent",
                    value: value.to_string(),
                })?;
                Command::OpenRecent(n)
            }
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

/// Split a line on whitespace, keeping double-quoted runs together
fn split_args(line: &str) -> Result<Vec<String>, CommandError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}

fn paths(args: &[&str], command: &'static str) -> Result<Vec<PathBuf>, CommandError> {
    if args.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(args.iter().map(PathBuf::from).collect())
}
