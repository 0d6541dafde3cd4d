use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::*;

/// One game of minesweeper and the random source used to lay its mines.
///
/// The engine does not refuse moves after the game ended, callers stop sending them once [`GameStatus::is_over`].
#[derive(Clone, Debug)]
pub struct Minesweeper<R = SmallRng> {
    board: Board,
    rng: R,
}

impl Minesweeper<SmallRng> {
    /// Empty board with a reproducible mine layout for a given seed.
    pub fn from_seed(size: Coord2, seed: u64) -> Self {
        Self::with_rng(size, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Minesweeper<R> {
    pub fn with_rng(size: Coord2, rng: R) -> Self {
        Self::from_board(Board::new(size), rng)
    }

    /// Resume from a prepared board, e.g. a fixed mine layout.
    pub fn from_board(board: Board, rng: R) -> Self {
        Self { board, rng }
    }

    /// Fresh grid with `config.mines` mines, returns how many actually fit.
    pub fn new_game(&mut self, config: GameConfig) -> CellCount {
        self.generate_grid(config.size);
        self.place_mines(config.mines)
    }

    /// Throws the current grid away and starts over with `rows x columns` hidden tiles, no mines.
    pub fn generate_grid(&mut self, size: Coord2) {
        self.board = Board::new(size);
        log::debug!("Generated a {:?} grid", self.board.size());
    }

    /// Adds up to `count` mines on tiles that are neither mined nor revealed, returns how many were placed.
    ///
    /// Existing mines are kept.
    pub fn place_mines(&mut self, count: CellCount) -> CellCount {
        if count == 0 {
            return 0;
        }

        let mut candidates: Vec<Coord2> = self
            .board
            .iter()
            .filter(|(_, tile)| !tile.mine && !tile.revealed)
            .map(|(coords, _)| coords)
            .collect();
        candidates.shuffle(&mut self.rng);

        let placed = candidates.len().min(count.into());
        for &coords in &candidates[..placed] {
            self.board[coords].mine = true;
        }

        if placed < usize::from(count) {
            log::warn!(
                "Board already full, requested {} mines but only {} fit",
                count,
                placed
            );
        }
        // placed <= count, so it fits
        placed as CellCount
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid_size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn tile(&self, coords: Coord2) -> Result<Tile> {
        self.board.tile(coords)
    }

    pub fn view(&self, coords: Coord2, game_over: bool) -> Result<TileView> {
        self.board.view(coords, game_over)
    }

    pub fn surrounding_tiles(&self, coords: Coord2, allow_diagonals: bool) -> Result<Neighbors> {
        self.board.surrounding_tiles(coords, allow_diagonals)
    }

    pub fn surrounding_mines(&self, coords: Coord2) -> Result<Neighbors> {
        self.board.surrounding_mines(coords)
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn mines_left(&self) -> isize {
        self.board.mines_left()
    }

    pub fn is_grid_empty(&self) -> bool {
        self.board.is_grid_empty()
    }

    pub fn check_win(&self) -> GameStatus {
        self.board.check_win()
    }

    pub fn reveal_safe_tiles_from(&mut self, coords: Coord2) -> Result<CellCount> {
        self.board.reveal_safe_tiles_from(coords)
    }

    /// Plays one move at `coords`: a mark toggle when `mark` is set, a reveal otherwise.
    ///
    /// - marked tiles only ever get unmarked, so a stray click cannot open them
    /// - the first reveal of a game never hits a mine, the mine is moved elsewhere
    /// - revealing an already revealed tile chords it: once its neighbors carry as many marks as it has surrounding
    ///   mines, all other hidden neighbors are revealed, wrong marks included
    pub fn guess_tile(&mut self, coords: Coord2, mark: bool) -> Result<GameStatus> {
        let coords = self.board.validate_coords(coords)?;
        let tile = self.board[coords];

        if mark || tile.marked {
            self.board[coords].marked = !tile.marked;
            log::debug!("Mark at {:?} set to {}", coords, !tile.marked);
        } else if tile.mine && self.board.is_grid_empty() {
            log::debug!("First guess at {:?} hit a mine, moving it", coords);
            self.board[coords].mine = false;
            self.board[coords].revealed = true;
            self.place_mines(1);
            self.board.flood_from(coords);
        } else if tile.revealed {
            if !tile.mine {
                self.chord(coords);
            }
        } else if tile.mine {
            log::debug!("Mine hit at {:?}", coords);
            self.board[coords].revealed = true;
        } else {
            self.board.flood_from(coords);
        }

        let status = self.board.check_win();
        if status.is_over() {
            log::debug!("Game over at {:?}: {:?}", coords, status);
        }
        Ok(status)
    }

    fn chord(&mut self, coords: Coord2) {
        let neighbors: Neighbors = self.board.neighbors(coords).collect();
        let marks = neighbors
            .iter()
            .filter(|&&pos| self.board[pos].counts_as_mark())
            .count();
        let mines = usize::from(self.board.mines_around(coords));

        if marks != mines {
            log::trace!(
                "Chord at {:?} ignored, {} marks for {} mines",
                coords,
                marks,
                mines
            );
            return;
        }

        for pos in neighbors {
            let neighbor = self.board[pos];
            if neighbor.marked || neighbor.revealed {
                continue;
            }

            self.board[pos].revealed = true;
            if !neighbor.mine {
                self.board.flood_from(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> Minesweeper {
        let board = Board::from_mine_coords(size, mines).unwrap();
        Minesweeper::from_board(board, SmallRng::seed_from_u64(7))
    }

    fn mine_coords(engine: &Minesweeper) -> Vec<Coord2> {
        engine
            .board()
            .iter()
            .filter(|(_, tile)| tile.mine)
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn generate_grid_replaces_the_board() {
        let mut engine = engine((3, 3), &[(1, 1)]);
        engine.guess_tile((0, 0), false).unwrap();

        engine.generate_grid((4, 6));

        assert_eq!(engine.grid_size(), (4, 6));
        assert_eq!(engine.total_mines(), 0);
        assert!(engine.is_grid_empty());
    }

    #[test]
    fn place_mines_never_over_places() {
        let mut engine = Minesweeper::from_seed((3, 4), 1);

        assert_eq!(engine.place_mines(0), 0);
        assert_eq!(engine.total_mines(), 0);

        assert_eq!(engine.place_mines(5), 5);
        assert_eq!(engine.total_mines(), 5);

        assert_eq!(engine.place_mines(5), 5);
        assert_eq!(engine.total_mines(), 10);

        assert_eq!(engine.place_mines(5), 2);
        assert_eq!(engine.total_mines(), 12);
    }

    #[test]
    fn place_mines_skips_revealed_tiles() {
        let mut engine = engine((2, 2), &[]);
        engine.board[(0, 0)].revealed = true;

        assert_eq!(engine.place_mines(4), 3);
        assert!(!engine.tile((0, 0)).unwrap().mine);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new((8, 8), 10).unwrap();
        let mut first = Minesweeper::from_seed((1, 1), 42);
        let mut second = Minesweeper::from_seed((1, 1), 42);

        assert_eq!(first.new_game(config), 10);
        assert_eq!(second.new_game(config), 10);

        assert_eq!(mine_coords(&first), mine_coords(&second));
    }

    #[test]
    fn mark_toggles_without_revealing() {
        let mut engine = engine((3, 3), &[(1, 1)]);

        for round in 0..4 {
            let status = engine.guess_tile((0, 0), true).unwrap();
            assert_eq!(status, GameStatus::InProgress);
            let tile = engine.tile((0, 0)).unwrap();
            assert_eq!(tile.marked, round % 2 == 0);
            assert!(!tile.revealed);
        }
    }

    #[test]
    fn reveal_on_marked_tile_unmarks_it() {
        let mut engine = engine((3, 3), &[(1, 1)]);
        engine.guess_tile((2, 2), false).unwrap();
        engine.guess_tile((1, 1), true).unwrap();

        assert_eq!(engine.guess_tile((1, 1), false), Ok(GameStatus::InProgress));

        let tile = engine.tile((1, 1)).unwrap();
        assert!(!tile.marked);
        assert!(!tile.revealed);
    }

    #[test]
    fn marking_the_only_mine_wins() {
        let mut engine = engine((3, 3), &[(1, 1)]);

        assert_eq!(engine.guess_tile((1, 1), true), Ok(GameStatus::Won));
    }

    #[test]
    fn revealing_every_safe_tile_wins() {
        let mut engine = engine((3, 3), &[(1, 1)]);
        let ring = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
        ];
        for coords in ring {
            assert_eq!(engine.guess_tile(coords, false), Ok(GameStatus::InProgress));
        }

        assert_eq!(engine.guess_tile((2, 2), false), Ok(GameStatus::Won));
        assert_eq!(engine.mines_left(), 1);
    }

    #[test]
    fn first_guess_on_mine_is_safe() {
        let mut engine = engine((4, 4), &[(0, 0)]);

        let status = engine.guess_tile((0, 0), false).unwrap();

        assert!(!status.is_over() || status.player_won());
        let tile = engine.tile((0, 0)).unwrap();
        assert!(tile.revealed);
        assert!(!tile.mine);
        assert_eq!(engine.total_mines(), 1);
    }

    #[test]
    fn first_guess_on_full_board_is_safe() {
        for seed in 0..16 {
            let mut engine = Minesweeper::from_seed((3, 3), seed);
            engine.place_mines(9);

            let status = engine.guess_tile((1, 1), false).unwrap();

            assert_eq!(status, GameStatus::Won);
            assert_eq!(engine.total_mines(), 8);
        }
    }

    #[test]
    fn first_guess_never_loses_on_random_boards() {
        for seed in 0..32 {
            let mut engine = Minesweeper::from_seed((1, 1), seed);
            engine.new_game(GameConfig::from_density((6, 6), 60.0));

            let status = engine.guess_tile((2, 3), false).unwrap();

            assert_ne!(status, GameStatus::Lost);
        }
    }

    #[test]
    fn stepping_on_a_mine_loses() {
        let mut engine = engine((3, 3), &[(0, 0), (2, 2)]);
        engine.guess_tile((0, 2), false).unwrap();

        assert_eq!(engine.guess_tile((2, 2), false), Ok(GameStatus::Lost));
        assert!(engine.tile((2, 2)).unwrap().revealed);
        assert_eq!(engine.view((0, 0), true), Ok(TileView::Mine));
        assert_eq!(engine.view((2, 2), true), Ok(TileView::Exploded));
    }

    #[test]
    fn flood_from_corner_wins_open_board() {
        let mut engine = engine((5, 5), &[(0, 0)]);

        assert_eq!(engine.guess_tile((4, 4), false), Ok(GameStatus::Won));
        let revealed = engine
            .board()
            .iter()
            .filter(|(_, tile)| tile.revealed)
            .count();
        assert_eq!(revealed, 24);
    }

    #[test]
    fn chord_reveals_neighbors_when_marks_match() {
        let mut engine = engine((3, 3), &[(0, 1), (2, 1)]);
        engine.guess_tile((1, 1), false).unwrap();
        engine.guess_tile((0, 1), true).unwrap();
        engine.guess_tile((2, 1), true).unwrap();

        let status = engine.guess_tile((1, 1), false).unwrap();

        assert_eq!(status, GameStatus::Won);
        assert_eq!(engine.view((1, 0), false), Ok(TileView::Open(2)));
        assert_eq!(engine.view((1, 2), false), Ok(TileView::Open(2)));
        assert!(!engine.tile((0, 1)).unwrap().revealed);
    }

    #[test]
    fn chord_is_ignored_when_marks_do_not_match() {
        let mut engine = engine((3, 3), &[(0, 1), (2, 1)]);
        engine.guess_tile((1, 1), false).unwrap();
        engine.guess_tile((0, 1), true).unwrap();

        assert_eq!(engine.guess_tile((1, 1), false), Ok(GameStatus::InProgress));
        assert!(!engine.tile((1, 0)).unwrap().revealed);
        assert!(!engine.tile((2, 1)).unwrap().revealed);
    }

    #[test]
    fn chord_with_wrong_marks_detonates() {
        let mut engine = engine((3, 3), &[(0, 1)]);
        engine.guess_tile((1, 1), false).unwrap();
        engine.guess_tile((2, 1), true).unwrap();

        assert_eq!(engine.guess_tile((1, 1), false), Ok(GameStatus::Lost));
        assert!(engine.tile((0, 1)).unwrap().revealed);
        assert_eq!(engine.view((2, 1), true), Ok(TileView::IncorrectFlag));
    }

    #[test]
    fn chord_floods_zero_neighbors() {
        let mut engine = engine((1, 5), &[(0, 0)]);
        engine.guess_tile((0, 1), false).unwrap();
        engine.guess_tile((0, 0), true).unwrap();

        assert_eq!(engine.guess_tile((0, 1), false), Ok(GameStatus::Won));
        assert!(engine.tile((0, 4)).unwrap().revealed);
    }

    #[test]
    fn guess_out_of_bounds_is_rejected() {
        let mut engine = engine((2, 2), &[(0, 0)]);

        assert_eq!(
            engine.guess_tile((2, 0), false),
            Err(GameError::InvalidCoords((2, 0)))
        );
        assert!(engine.is_grid_empty());
    }
}
