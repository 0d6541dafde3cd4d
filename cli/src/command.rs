use minesweep_core::{Coord, Coord2};
use std::str::FromStr;
use thiserror::Error;

pub(crate) const HELP: &str = "\
r ROW COL  reveal a tile, or chord an already revealed one
m ROW COL  mark or unmark a tile
n          start a new game
h          show this help
q          quit";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Mark(Coord2),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub(crate) enum CommandError {
    #[error("Empty command, type h for help")]
    Empty,
    #[error("Unknown command {0:?}, type h for help")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("Invalid coordinate {0:?}")]
    InvalidNumber(String),
    #[error("Unexpected input {0:?}")]
    TrailingInput(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "m" | "mark" | "f" | "flag" => Self::Mark(parse_coords(&mut words)?),
            "n" | "new" => Self::NewGame,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingInput(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let row = parse_coord(words.next())?;
    let column = parse_coord(words.next())?;
    Ok((row, column))
}

fn parse_coord(word: Option<&str>) -> Result<Coord, CommandError> {
    let word = word.ok_or(CommandError::MissingCoords)?;
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_owned()))
}
