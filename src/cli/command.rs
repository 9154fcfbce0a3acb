//! Parsing of console input lines.
//!
//! Players type 1-based coordinates; everything handed to the engine is
//! 0-based and already checked against the grid size.

use std::fmt;
use std::path::PathBuf;

use crate::core::{Coordinate, Orientation};

/// One line typed during play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnCommand {
    Shoot(Coordinate),
    /// Save to the given path, or to the default location.
    Save(Option<PathBuf>),
    Quit,
}

/// One line typed during ship placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementCommand {
    Place {
        start: Coordinate,
        orientation: Orientation,
    },
    /// Place the rest of the fleet at random.
    Random,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    /// Wrong number of words on the line.
    Arity { expected: usize, found: usize },
    NotANumber(String),
    OutOfRange { value: usize, max: usize },
    BadOrientation(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Please enter a command"),
            CommandError::Arity { expected, found } => {
                write!(f, "Expected {} values, got {}", expected, found)
            }
            CommandError::NotANumber(word) => write!(f, "'{}' is not a number", word),
            CommandError::OutOfRange { value, max } => {
                write!(f, "{} is out of range, use 1 to {}", value, max)
            }
            CommandError::BadOrientation(word) => {
                write!(f, "'{}' is not an orientation, use H, -H, V or -V", word)
            }
        }
    }
}

impl std::error::Error for CommandError {}

fn parse_axis(word: &str, grid_size: usize) -> Result<usize, CommandError> {
    let value: usize = word
        .parse()
        .map_err(|_| CommandError::NotANumber(word.to_string()))?;
    if value == 0 || value > grid_size {
        return Err(CommandError::OutOfRange {
            value,
            max: grid_size,
        });
    }
    Ok(value - 1)
}

/// Parse `x y` (1-based) into a 0-based coordinate.
pub fn parse_coordinate(x: &str, y: &str, grid_size: usize) -> Result<Coordinate, CommandError> {
    Ok(Coordinate::new(
        parse_axis(x, grid_size)?,
        parse_axis(y, grid_size)?,
    ))
}

/// Parse a play line: `x y`, `save [path]`, `q` or `quit`.
pub fn parse_turn(line: &str, grid_size: usize) -> Result<TurnCommand, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Err(CommandError::Empty),
        [cmd] if is_quit(cmd) => Ok(TurnCommand::Quit),
        [cmd, rest @ ..] if cmd.eq_ignore_ascii_case("save") => {
            let path = line.trim_start()[cmd.len()..].trim();
            if rest.is_empty() || path.is_empty() {
                Ok(TurnCommand::Save(None))
            } else {
                Ok(TurnCommand::Save(Some(PathBuf::from(path))))
            }
        }
        [x, y] => parse_coordinate(x, y, grid_size).map(TurnCommand::Shoot),
        other => Err(CommandError::Arity {
            expected: 2,
            found: other.len(),
        }),
    }
}

/// Parse a placement line: `x y H|-H|V|-V`, `r`/`random`, `q`/`quit`.
pub fn parse_placement(line: &str, grid_size: usize) -> Result<PlacementCommand, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Err(CommandError::Empty),
        [cmd] if is_quit(cmd) => Ok(PlacementCommand::Quit),
        [cmd] if cmd.eq_ignore_ascii_case("r") || cmd.eq_ignore_ascii_case("random") => {
            Ok(PlacementCommand::Random)
        }
        [x, y, orientation] => {
            let orientation: Orientation = orientation
                .parse()
                .map_err(|_| CommandError::BadOrientation(orientation.to_string()))?;
            Ok(PlacementCommand::Place {
                start: parse_coordinate(x, y, grid_size)?,
                orientation,
            })
        }
        other => Err(CommandError::Arity {
            expected: 3,
            found: other.len(),
        }),
    }
}

fn is_quit(word: &str) -> bool {
    word.eq_ignore_ascii_case("q") || word.eq_ignore_ascii_case("quit")
}
