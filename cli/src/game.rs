use minesweep_core::{Board, Coord2, GameConfig, GameError, GameStatus, Minesweeper};
use thiserror::Error;

use crate::render::BoardDisplay;

#[derive(Error, Debug, PartialEq)]
pub(crate) enum PlayError {
    #[error("Game is over, type n for a new one")]
    GameOver,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// A running game together with the configuration used to restart it.
pub(crate) struct Session {
    engine: Minesweeper,
    config: GameConfig,
    status: GameStatus,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut session = Self {
            engine: Minesweeper::from_seed(config.size, seed),
            config,
            status: GameStatus::default(),
        };
        session.restart();
        session
    }

    pub fn restart(&mut self) {
        let placed = self.engine.new_game(self.config);
        self.status = GameStatus::InProgress;
        log::info!(
            "New {}x{} game with {} mines",
            self.config.size.0,
            self.config.size.1,
            placed
        );
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    /// Input is frozen once the game has ended.
    pub fn play(&mut self, coords: Coord2, mark: bool) -> Result<GameStatus, PlayError> {
        if self.status.is_over() {
            return Err(PlayError::GameOver);
        }
        self.status = self.engine.guess_tile(coords, mark)?;
        Ok(self.status)
    }

    pub fn display(&self) -> BoardDisplay<'_> {
        BoardDisplay {
            board: self.board(),
            game_over: self.status.is_over(),
        }
    }

    pub fn status_line(&self) -> String {
        match self.status() {
            GameStatus::InProgress => format!("Mines left: {}", self.engine.mines_left()),
            GameStatus::Won => "You win!".to_owned(),
            GameStatus::Lost => "You lose!".to_owned(),
        }
    }
}
