use serde::{Deserialize, Serialize};

/// One grid cell, the three flags are independent of each other.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub mine: bool,
    pub revealed: bool,
    pub marked: bool,
}

impl Tile {
    /// Marked and still hidden, the only kind of flag that counts for the player.
    pub const fn is_flagged(self) -> bool {
        self.marked && !self.revealed
    }

    /// Takes part in the chord count: a flag, or a mine that already went off.
    pub const fn counts_as_mark(self) -> bool {
        self.marked || (self.mine && self.revealed)
    }
}

/// What the player gets to see of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Open(u8),
    Flag,
    Exploded,
    Mine,
    IncorrectFlag,
}

impl TileView {
    /// `surrounding_mines` is only read for revealed safe tiles.
    pub const fn of(tile: Tile, surrounding_mines: u8, game_over: bool) -> Self {
        use TileView::*;

        match tile {
            Tile {
                revealed: true,
                mine: true,
                ..
            } => Exploded,
            Tile { revealed: true, .. } => Open(surrounding_mines),
            Tile {
                mine: true,
                marked: false,
                ..
            } if game_over => Mine,
            Tile {
                mine: false,
                marked: true,
                ..
            } if game_over => IncorrectFlag,
            Tile { marked: true, .. } => Flag,
            _ => Hidden,
        }
    }
}
