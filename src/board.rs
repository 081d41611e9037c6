use log::trace;

use std::fmt;

use crate::error::{ConfigError, MoveError};
use crate::game::PlayerId;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(PlayerId::One),
            Cell::PlayerTwo => Some(PlayerId::Two),
        }
    }
}

impl From<PlayerId> for Cell {
    fn from(player: PlayerId) -> Self {
        match player {
            PlayerId::One => Cell::PlayerOne,
            PlayerId::Two => Cell::PlayerTwo,
        }
    }
}

/// A fixed-size Connect Four grid
///
/// Row 0 is the bottom row. Discs in a column always form a contiguous run
/// from row 0 upwards, which is what lets a single height counter per column
/// stand in for a scan.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    num_discs: usize,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        let too_many_cells = width
            .checked_mul(height)
            .map_or(true, |cells| cells > u8::MAX as usize);
        if width == 0 || height == 0 || too_many_cells {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            heights: vec![0; width],
            num_discs: 0,
        })
    }

    /// Removes every disc, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Empty);
        self.heights.iter_mut().for_each(|height| *height = 0);
        self.num_discs = 0;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of discs placed so far
    pub fn num_discs(&self) -> usize {
        self.num_discs
    }

    /// Number of discs stacked in `column`
    ///
    /// # Panics
    /// If `column` lies outside the board
    pub fn column_height(&self, column: usize) -> usize {
        self.heights[column]
    }

    /// True iff the top row of `column` is occupied. Columns outside the
    /// board count as full.
    pub fn is_full(&self, column: usize) -> bool {
        column >= self.width || self.heights[column] == self.height
    }

    /// True iff no column can take another disc
    pub fn is_complete(&self) -> bool {
        self.num_discs == self.width * self.height
    }

    pub fn lowest_empty_row(&self, column: usize) -> Option<usize> {
        if self.is_full(column) {
            None
        } else {
            Some(self.heights[column])
        }
    }

    /// Drops a disc into `column`, returning the row where it landed
    pub fn place(&mut self, column: usize, cell: Cell) -> Result<usize, MoveError> {
        if column >= self.width {
            return Err(MoveError::OutOfRange {
                column,
                width: self.width,
            });
        }
        let row = self
            .lowest_empty_row(column)
            .ok_or(MoveError::ColumnFull { column })?;

        self.cells[column + self.width * row] = cell;
        self.heights[column] += 1;
        self.num_discs += 1;
        trace!("placed {:?} at row {}, column {}", cell, row, column);
        Ok(row)
    }

    /// # Panics
    /// If `row` or `column` lies outside the board
    pub fn cell_at(&self, row: usize, column: usize) -> Cell {
        assert!(row < self.height && column < self.width);
        self.cells[column + self.width * row]
    }

    /// Like [`cell_at`](Self::cell_at), but `None` off the board
    pub fn get(&self, row: isize, column: isize) -> Option<Cell> {
        if row < 0 || column < 0 || row as usize >= self.height || column as usize >= self.width {
            return None;
        }
        Some(self.cells[column as usize + self.width * row as usize])
    }
}

impl fmt::Display for Board {
    /// Plain text rendering, top row first: `.` empty, `O` player 1, `X` player 2
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height).rev() {
            let line: Vec<&str> = (0..self.width)
                .map(|column| match self.cell_at(row, column) {
                    Cell::Empty => ".",
                    Cell::PlayerOne => "O",
                    Cell::PlayerTwo => "X",
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn new_board_is_empty() -> Result<()> {
        let board = Board::new(7, 6)?;
        for row in 0..6 {
            for column in 0..7 {
                assert_eq!(board.cell_at(row, column), Cell::Empty);
            }
        }
        assert_eq!(board.num_discs(), 0);
        Ok(())
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(Board::new(0, 6).is_err());
        assert!(Board::new(7, 0).is_err());
        assert!(Board::new(16, 16).is_err());
    }

    #[test]
    fn huge_dimensions_are_rejected() {
        assert_eq!(
            Board::new(1 << 32, 1 << 32),
            Err(ConfigError::InvalidDimensions {
                width: 1 << 32,
                height: 1 << 32,
            })
        );
        assert_eq!(
            Board::new(usize::MAX, 2),
            Err(ConfigError::InvalidDimensions {
                width: usize::MAX,
                height: 2,
            })
        );
    }

    #[test]
    fn discs_stack_from_the_bottom() -> Result<()> {
        let mut board = Board::new(7, 6)?;
        assert_eq!(board.place(3, Cell::PlayerOne)?, 0);
        assert_eq!(board.place(3, Cell::PlayerTwo)?, 1);
        assert_eq!(board.cell_at(0, 3), Cell::PlayerOne);
        assert_eq!(board.cell_at(1, 3), Cell::PlayerTwo);
        assert_eq!(board.lowest_empty_row(3), Some(2));
        assert_eq!(board.column_height(3), 2);
        Ok(())
    }

    #[test]
    fn full_column_rejects_disc() -> Result<()> {
        let mut board = Board::new(7, 6)?;
        for _ in 0..6 {
            board.place(0, Cell::PlayerOne)?;
        }
        let before = board.clone();

        assert!(board.is_full(0));
        assert_eq!(board.lowest_empty_row(0), None);
        assert_eq!(
            board.place(0, Cell::PlayerTwo),
            Err(MoveError::ColumnFull { column: 0 })
        );
        assert_eq!(board, before);
        Ok(())
    }

    #[test]
    fn out_of_range_column() -> Result<()> {
        let mut board = Board::new(7, 6)?;
        assert!(board.is_full(7));
        assert_eq!(
            board.place(7, Cell::PlayerOne),
            Err(MoveError::OutOfRange { column: 7, width: 7 })
        );
        assert_eq!(board.get(0, 7), None);
        assert_eq!(board.get(-1, 0), None);
        Ok(())
    }

    #[test]
    #[should_panic]
    fn column_height_off_the_board() {
        let board = Board::new(7, 6).unwrap();
        board.column_height(7);
    }

    #[test]
    fn complete_board() -> Result<()> {
        let mut board = Board::new(3, 2)?;
        for column in 0..3 {
            board.place(column, Cell::PlayerOne)?;
            board.place(column, Cell::PlayerTwo)?;
        }
        assert!(board.is_complete());
        Ok(())
    }

    #[test]
    fn renders_top_row_first() -> Result<()> {
        let mut board = Board::new(3, 2)?;
        board.place(1, Cell::PlayerOne)?;
        board.place(1, Cell::PlayerTwo)?;
        board.place(2, Cell::PlayerOne)?;
        assert_eq!(board.to_string(), ". X .\n. O O\n");
        Ok(())
    }
}
