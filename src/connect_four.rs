//! Connect Four rules on top of [`Board`]

use anyhow::{anyhow, Result};

use crate::board::{Board, Cell};
use crate::error::{ConfigError, MoveError};
use crate::game::{Outcome, PlayerId, TwoPlayerGame};
use crate::{HEIGHT, WIDTH, WIN_LENGTH};

/// Score returned by [`GameState::static_score`] when the acting player has lost
pub const LOSS_SCORE: i32 = -100;

// (row step, column step) for horizontal, vertical, diagonal up and diagonal down lines
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// A game of Connect Four in progress
///
/// Whether the game is won or drawn is always derived from the board, so the
/// state can be mutated freely by the search without stale flags. `clone`
/// deep-copies the board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    board: Board,
    current_player: PlayerId,
    win_length: usize,
}

impl GameState {
    /// A fresh game on a `width` x `height` board, four in a row to win
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::with_win_length(width, height, WIN_LENGTH)
    }

    pub fn with_win_length(
        width: usize,
        height: usize,
        win_length: usize,
    ) -> Result<Self, ConfigError> {
        let board = Board::new(width, height)?;
        if win_length < 2 || win_length > width.max(height) {
            return Err(ConfigError::InvalidWinLength {
                win_length,
                width,
                height,
            });
        }
        Ok(Self {
            board,
            current_player: PlayerId::One,
            win_length,
        })
    }

    /// The classic 7x6, four in a row game
    pub fn standard() -> Self {
        Self {
            board: Board::new(WIDTH, HEIGHT).expect("default dimensions are valid"),
            current_player: PlayerId::One,
            win_length: WIN_LENGTH,
        }
    }

    /// Replays a string of 1-indexed column digits, alternating players
    pub fn from_moves<S: AsRef<str>>(
        width: usize,
        height: usize,
        win_length: usize,
        moves: S,
    ) -> Result<Self> {
        let mut state = Self::with_win_length(width, height, win_length)?;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 => {
                    if state.is_terminal() {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    state.apply_move(column - 1)?;
                    state.switch_turn();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(state)
    }

    /// Clears the board and gives the first move back to player 1
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = PlayerId::One;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn num_moves(&self) -> usize {
        self.board.num_discs()
    }

    pub fn cell_at(&self, row: usize, column: usize) -> Cell {
        self.board.cell_at(row, column)
    }

    /// Columns that can still take a disc, in ascending order
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.width())
            .filter(|&column| !self.board.is_full(column))
            .collect()
    }

    /// Drops the current player's disc into `column`. The turn is not passed;
    /// call [`switch_turn`](Self::switch_turn) for that.
    pub fn apply_move(&mut self, column: usize) -> Result<usize, MoveError> {
        self.board.place(column, self.current_player.into())
    }

    pub fn switch_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Whether `player` has `win_length` or more discs in a line in any of
    /// the four orientations
    pub fn check_winner(&self, player: PlayerId) -> bool {
        let target = Cell::from(player);
        let (width, height) = (self.width() as isize, self.height() as isize);
        let span = self.win_length as isize - 1;

        for row in 0..height {
            for column in 0..width {
                if self.board.cell_at(row as usize, column as usize) != target {
                    continue;
                }
                for &(dr, dc) in DIRECTIONS.iter() {
                    // skip lines whose far end falls off the board
                    if self.board.get(row + dr * span, column + dc * span).is_none() {
                        continue;
                    }
                    if (1..=span).all(|i| self.board.get(row + dr * i, column + dc * i) == Some(target)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// True iff the opponent of `player` has a winning line
    pub fn is_loss_for(&self, player: PlayerId) -> bool {
        self.check_winner(player.opponent())
    }

    pub fn is_terminal(&self) -> bool {
        self.check_winner(PlayerId::One) || self.check_winner(PlayerId::Two) || self.board.is_complete()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.check_winner(PlayerId::One) {
            Some(Outcome::Winner(PlayerId::One))
        } else if self.check_winner(PlayerId::Two) {
            Some(Outcome::Winner(PlayerId::Two))
        } else if self.board.is_complete() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// [`LOSS_SCORE`] if `player` has lost, 0 otherwise
    pub fn static_score(&self, player: PlayerId) -> i32 {
        if self.is_loss_for(player) {
            LOSS_SCORE
        } else {
            0
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}

impl TwoPlayerGame for GameState {
    type Move = usize;

    fn current_player(&self) -> PlayerId {
        self.current_player
    }

    fn possible_moves(&self) -> Vec<usize> {
        self.legal_moves()
    }

    fn make_move(&mut self, column: usize) -> Result<(), MoveError> {
        self.apply_move(column).map(|_| ())
    }

    fn switch_player(&mut self) {
        self.switch_turn()
    }

    fn is_over(&self) -> bool {
        self.is_terminal()
    }

    fn static_score(&self, player: PlayerId) -> i32 {
        GameState::static_score(self, player)
    }
}
