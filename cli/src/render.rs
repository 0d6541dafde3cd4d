use minesweep_core::{Board, Coord, TileView};
use std::fmt;

pub(crate) const fn glyph(view: TileView) -> char {
    use TileView::*;
    match view {
        Hidden => '#',
        Open(0) => '.',
        // counts never exceed 8
        Open(count) => (b'0' + count) as char,
        Flag => 'F',
        Exploded => '*',
        Mine => 'o',
        IncorrectFlag => 'X',
    }
}

/// Text rendering of a board with row and column headers.
pub(crate) struct BoardDisplay<'a> {
    pub board: &'a Board,
    pub game_over: bool,
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, columns) = self.board.size();
        let label = digits(rows - 1);
        let cell = digits(columns - 1);

        write!(f, "{:label$}", "")?;
        for column in 0..columns {
            write!(f, " {column:>cell$}")?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{row:>label$}")?;
            for column in 0..columns {
                let view = self
                    .board
                    .view((row, column), self.game_over)
                    .map_err(|_| fmt::Error)?;
                write!(f, " {:>cell$}", glyph(view))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn digits(value: Coord) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}
