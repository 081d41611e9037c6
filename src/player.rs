//! The two kinds of participants: humans typing columns and the search engine
//!
//! Players only propose a column. Applying it and passing the turn is up to
//! whoever drives the game (see [`Session`](crate::session::Session)).

use anyhow::{anyhow, Result};

use std::io::{BufRead, Write};

use crate::connect_four::GameState;
use crate::difficulty::Difficulty;
use crate::solver::Negamax;

pub trait Player {
    fn name(&self) -> &str;

    /// Proposes a 0-indexed column for the player to act in `state`
    fn ask_move(&mut self, state: &GameState) -> Result<usize>;

    /// Whether moves come from the search engine rather than a person
    fn is_computer(&self) -> bool {
        false
    }

    /// How many plies a computer player looks ahead
    fn search_depth(&self) -> Option<u32> {
        None
    }

    /// Changes the strength of computer players, ignored by humans
    fn set_difficulty(&mut self, _difficulty: Difficulty) {}
}

/// A person entering 1-indexed column numbers on a text stream
pub struct Human<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Human<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    /// Checks a typed column, returning it 0-indexed
    fn parse_column(state: &GameState, line: &str) -> Result<usize> {
        let column_one_indexed = line
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow!("Invalid number: {}", line.trim()))?;
        if column_one_indexed < 1 || column_one_indexed > state.width() {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                state.width()
            ));
        }
        let column = column_one_indexed - 1;
        if state.board().is_full(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }
        Ok(column)
    }
}

impl<R: BufRead, W: Write> Player for Human<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    /// Prompts until a playable column is entered
    fn ask_move(&mut self, state: &GameState) -> Result<usize> {
        loop {
            write!(self.output, "Move input > ")?;
            self.output.flush()?;

            let mut buffer = String::new();
            if self.input.read_line(&mut buffer)? == 0 {
                return Err(anyhow!("input closed before {} chose a move", self.name));
            }
            match Self::parse_column(state, &buffer) {
                Ok(column) => return Ok(column),
                // try the move again
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }
}

/// A player delegating to [`Negamax`]
pub struct Computer {
    name: String,
    engine: Negamax,
}

impl Computer {
    pub fn new(name: impl Into<String>, engine: Negamax) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }

    pub fn engine(&self) -> &Negamax {
        &self.engine
    }
}

impl Player for Computer {
    fn name(&self) -> &str {
        &self.name
    }

    fn ask_move(&mut self, state: &GameState) -> Result<usize> {
        Ok(self.engine.best_move(state)?)
    }

    fn is_computer(&self) -> bool {
        true
    }

    fn search_depth(&self) -> Option<u32> {
        Some(self.engine.depth())
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.engine.set_difficulty(difficulty);
    }
}
