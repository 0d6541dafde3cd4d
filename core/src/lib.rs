#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod tile;
mod types;

/// Lowest and highest accepted mine density, in percent.
pub const DENSITY_RANGE: (u8, u8) = (1, 99);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Exact mine count, which has to leave at least one safe tile.
    pub fn new((rows, columns): Coord2, mines: CellCount) -> Result<Self> {
        let size = (rows.max(1), columns.max(1));
        let total = mult(size.0, size.1);
        if mines >= total && total > 1 {
            return Err(GameError::TooManyMines { mines, tiles: total });
        }
        Ok(Self::new_unchecked(size, mines))
    }

    /// Mine count derived from a density percentage.
    ///
    /// The density is clamped to `1..=99`, the rounded count to `1..=total - 1`. A single-tile board still gets its
    /// one mine, which the first click then moves out of the way.
    pub fn from_density((rows, columns): Coord2, density: f32) -> Self {
        let (min_density, max_density) = DENSITY_RANGE;
        let size = (rows.max(1), columns.max(1));
        let total = mult(size.0, size.1);

        let density = if density.is_nan() {
            f32::from(min_density)
        } else {
            density.clamp(f32::from(min_density), f32::from(max_density))
        };
        // round half away from zero without std
        let wanted = (f32::from(total) * density / 100.0 + 0.5) as CellCount;
        let max_mines = total.saturating_sub(1).max(1);
        let mines = wanted.clamp(1, max_mines);

        log::debug!(
            "{}x{} board at {}% density gets {} mines",
            size.0,
            size.1,
            density,
            mines
        );
        Self::new_unchecked(size, mines)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Where a game stands after a move, see [`Board::check_win`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves should be made anymore
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    pub const fn player_won(self) -> bool {
        matches!(self, Self::Won)
    }

    /// `(game_over, player_won)`
    pub const fn as_pair(self) -> (bool, bool) {
        (self.is_over(), self.player_won())
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

impl From<GameStatus> for (bool, bool) {
    fn from(status: GameStatus) -> Self {
        status.as_pair()
    }
}
