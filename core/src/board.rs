use alloc::vec;
use core::ops::{Index, IndexMut};
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The tile matrix of a single game, indexed by `(row, column)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
}

impl Board {
    /// Fresh board with every tile hidden, unmarked and mine-free. Zero-sized axes are bumped to one.
    pub fn new((rows, columns): Coord2) -> Self {
        if rows == 0 || columns == 0 {
            log::warn!(
                "Requested a {}x{} board, clamping every axis to at least 1",
                rows,
                columns
            );
        }
        let size = (rows.max(1), columns.max(1));
        Self {
            tiles: Array2::default(size.to_nd_index()),
        }
    }

    /// Board with mines at exactly `mine_coords`, duplicates are ignored.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size);

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board[coords].mine = true;
        }

        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.tiles)
    }

    pub fn total_tiles(&self) -> CellCount {
        let (rows, columns) = self.size();
        mult(rows, columns)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords(coords))
        }
    }

    pub fn tile(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, column), &tile)| ((row as Coord, column as Coord), tile))
    }

    pub fn surrounding_tiles(&self, coords: Coord2, allow_diagonals: bool) -> Result<Neighbors> {
        let coords = self.validate_coords(coords)?;
        Ok(if allow_diagonals {
            self.tiles.iter_neighbors(coords).collect()
        } else {
            self.tiles.iter_orthogonal_neighbors(coords).collect()
        })
    }

    pub fn surrounding_mines(&self, coords: Coord2) -> Result<Neighbors> {
        let coords = self.validate_coords(coords)?;
        Ok(self
            .tiles
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].mine)
            .collect())
    }

    pub fn surrounding_mine_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.mines_around(coords))
    }

    pub(crate) fn mines_around(&self, coords: Coord2) -> u8 {
        // at most 8, the cast cannot truncate
        self.tiles
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].mine)
            .count() as u8
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.mine)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_tiles(Tile::is_flagged)
    }

    /// How many mines have not been flagged yet, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count() as isize) - (self.flag_count() as isize)
    }

    /// True until the first tile of the game gets revealed.
    pub fn is_grid_empty(&self) -> bool {
        !self.tiles.iter().any(|tile| tile.revealed)
    }

    /// Scores the board. A revealed mine loses before any win condition is looked at.
    pub fn check_win(&self) -> GameStatus {
        let mut total_tiles: CellCount = 0;
        let mut total_mines: CellCount = 0;
        let mut flagged_mines: CellCount = 0;
        let mut flagged_tiles: CellCount = 0;
        let mut revealed_safe: CellCount = 0;

        for tile in self.tiles.iter() {
            total_tiles += 1;

            if tile.revealed && tile.mine {
                return GameStatus::Lost;
            }

            if tile.revealed {
                revealed_safe += 1;
            }
            if tile.is_flagged() {
                flagged_tiles += 1;
            }
            if tile.mine {
                total_mines += 1;
                if tile.is_flagged() {
                    flagged_mines += 1;
                }
            }
        }

        let all_mines_flagged =
            total_mines > 0 && flagged_mines == total_mines && flagged_tiles == total_mines;
        let all_safe_revealed = revealed_safe == total_tiles - total_mines;

        if all_mines_flagged || all_safe_revealed {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    /// Flood reveal starting at `start`, returns how many tiles were newly revealed.
    ///
    /// Mines and marked tiles stop the fill without being revealed. Tiles without surrounding mines keep spreading
    /// to all eight neighbors.
    pub fn reveal_safe_tiles_from(&mut self, start: Coord2) -> Result<CellCount> {
        let start = self.validate_coords(start)?;
        Ok(self.flood_from(start))
    }

    /// Flood reveal from a tile already known to be on the board.
    pub(crate) fn flood_from(&mut self, start: Coord2) -> CellCount {
        let mut newly_revealed: CellCount = 0;
        let mut visited = HashSet::new();
        let mut to_check = vec![start];

        while let Some(coords) = to_check.pop() {
            if !visited.insert(coords) {
                continue;
            }

            let tile = &mut self[coords];
            if tile.mine || tile.marked {
                log::trace!("Flood stopped at {:?}", coords);
                continue;
            }
            if !tile.revealed {
                tile.revealed = true;
                newly_revealed += 1;
            }

            if self.mines_around(coords) == 0 {
                to_check.extend(
                    self.tiles
                        .iter_neighbors(coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        log::debug!("Flood from {:?} revealed {} tiles", start, newly_revealed);
        newly_revealed
    }

    /// Display state of a tile, `game_over` exposes hidden mines and wrong flags.
    pub fn view(&self, coords: Coord2, game_over: bool) -> Result<TileView> {
        let tile = self.tile(coords)?;
        Ok(TileView::of(tile, self.mines_around(coords), game_over))
    }

    pub(crate) fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    fn count_tiles(&self, predicate: impl Fn(Tile) -> bool) -> CellCount {
        // bounded by the board area, which fits a CellCount
        self.tiles.iter().filter(|&&tile| predicate(tile)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}
