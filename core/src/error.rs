use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Tile {0:?} is outside the board")]
    InvalidCoords(Coord2),
    #[error("{mines} mines leave no safe tile on a board of {tiles} tiles")]
    TooManyMines { mines: CellCount, tiles: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
