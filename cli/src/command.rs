use std::str::FromStr;

use sweeper_core::{Coord, Coord2, GameError};
use thiserror::Error;

pub(crate) const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   flag or unflag a cell
  n               new game
  q               quit
  ?               this help";

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub(crate) enum CommandError {
    #[error("Empty command, type ? for help")]
    Empty,
    #[error("Unknown command {0:?}, type ? for help")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("Not a number: {0:?}")]
    InvalidNumber(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words)?),
            "n" | "new" => Command::NewGame,
            "?" | "h" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };

        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let (Some(row), Some(col)) = (words.next(), words.next()) else {
        return Err(CommandError::MissingCoords);
    };
    Ok((parse_coord(row)?, parse_coord(col)?))
}

/// Negative or oversized numbers can never be on the grid.
fn parse_coord(word: &str) -> Result<Coord, CommandError> {
    let value: i64 = word
        .parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))?;
    Coord::try_from(value).map_err(|_| GameError::OutOfBounds.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 2 3".parse::<Command>(), Ok(Command::Reveal((2, 3))));
        assert_eq!("  F 0 14 ".parse::<Command>(), Ok(Command::Flag((0, 14))));
        assert_eq!("reveal 1 1".parse::<Command>(), Ok(Command::Reveal((1, 1))));
    }

    #[test]
    fn parses_controls() {
        assert_eq!("n".parse::<Command>(), Ok(Command::NewGame));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn negative_coords_are_out_of_bounds() {
        assert_eq!(
            "r -1 0".parse::<Command>(),
            Err(CommandError::Game(GameError::OutOfBounds))
        );
        assert_eq!(
            "f 0 300".parse::<Command>(),
            Err(CommandError::Game(GameError::OutOfBounds))
        );
    }

    #[test]
    fn reports_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("r 1".parse::<Command>(), Err(CommandError::MissingCoords));
        assert_eq!(
            "r one 2".parse::<Command>(),
            Err(CommandError::InvalidNumber("one".to_string()))
        );
        assert_eq!(
            "dig 1 2".parse::<Command>(),
            Err(CommandError::Unknown("dig".to_string()))
        );
    }
}
