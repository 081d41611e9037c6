//! A Connect Four opponent driven by depth-limited negamax search
//!
//! The crate holds the game model (board, rules, win and draw detection) and
//! an adversarial search engine that picks the computer's move. Rendering and
//! input handling are left to the caller, who talks to the core through
//! [`GameState`] and [`Negamax`].
//!
//! # Basic Usage
//!
//! ```
//! use connect4_negamax::{GameState, Negamax};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player 1 has three discs stacked in column 4 and is to move
//! let state = GameState::from_moves(7, 6, 4, "414141")?;
//! let mut engine = Negamax::new(3)?;
//!
//! assert_eq!(engine.best_move(&state)?, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod arena;

pub mod board;

pub mod connect_four;

pub mod difficulty;

pub mod error;

pub mod game;

pub mod player;

pub mod session;

pub mod solver;


pub use board::{Board, Cell};
pub use connect_four::GameState;
pub use difficulty::Difficulty;
pub use error::{ConfigError, MoveError, SearchError};
pub use game::{Outcome, PlayerId, TwoPlayerGame};
pub use solver::{Evaluation, Negamax};

/// The default width of the game board in tiles
pub const WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The default number of discs in a line needed to win
pub const WIN_LENGTH: usize = 4;

// ensure the default game is playable: a line fits on the board and disc
// counts stay within the board size limit
const_assert!(WIN_LENGTH <= WIDTH || WIN_LENGTH <= HEIGHT);
const_assert!(WIN_LENGTH >= 2);
const_assert!(WIDTH * HEIGHT <= u8::MAX as usize);
