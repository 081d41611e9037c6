//! Drives one game between two players: asks for moves, applies them, passes
//! the turn and reports the result

use anyhow::{anyhow, Result};
use log::{info, warn};

use crate::connect_four::GameState;
use crate::difficulty::Difficulty;
use crate::game::{Outcome, PlayerId};
use crate::player::Player;

/// What happened during one call to [`Session::play_turn`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Turn {
    pub player: PlayerId,
    pub column: usize,
    pub row: usize,
    pub outcome: Option<Outcome>,
}

pub struct Session {
    state: GameState,
    players: [Box<dyn Player>; 2],
}

impl Session {
    /// `first` plays as player 1 and opens the game
    pub fn new(state: GameState, first: Box<dyn Player>, second: Box<dyn Player>) -> Self {
        Self {
            state,
            players: [first, second],
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self, id: PlayerId) -> &dyn Player {
        self.players[Self::index(id)].as_ref()
    }

    /// Takes effect on the next computer move
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!("difficulty set to {}", difficulty);
        for player in self.players.iter_mut() {
            player.set_difficulty(difficulty);
        }
    }

    /// Starts a new game with the same players
    pub fn reset(&mut self) {
        info!("new game");
        self.state.reset();
    }

    /// Lets the current player move. The turn only passes if the game goes on.
    pub fn play_turn(&mut self) -> Result<Turn> {
        if let Some(outcome) = self.state.outcome() {
            return Err(anyhow!("game is already over ({:?})", outcome));
        }

        let player = self.state.current_player();
        let current = &mut self.players[Self::index(player)];
        let (column, row) = loop {
            let column = current.ask_move(&self.state)?;
            match self.state.apply_move(column) {
                Ok(row) => break (column, row),
                // humans get asked again, the engine only proposes legal moves
                Err(err) if !current.is_computer() => warn!("{}: {}", current.name(), err),
                Err(err) => return Err(err.into()),
            }
        };
        info!("{} ({}) played column {}", current.name(), player, column + 1);

        let outcome = self.state.outcome();
        match outcome {
            Some(outcome) => info!("game over: {:?}\n{}", outcome, self.state.board()),
            None => self.state.switch_turn(),
        }
        Ok(Turn {
            player,
            column,
            row,
            outcome,
        })
    }

    /// Plays turns until the game ends, calling `on_turn` after each one
    pub fn play_out<F>(&mut self, mut on_turn: F) -> Result<Outcome>
    where
        F: FnMut(&Session, &Turn) -> Result<()>,
    {
        loop {
            let turn = self.play_turn()?;
            on_turn(self, &turn)?;
            if let Some(outcome) = turn.outcome {
                return Ok(outcome);
            }
        }
    }

    /// The line a front end shows under the board
    pub fn status_message(&self) -> String {
        match self.state.outcome() {
            Some(Outcome::Draw) => "Game over! It's a draw!".to_string(),
            Some(Outcome::Winner(id)) => {
                let winner = self.player(id);
                let loser = self.player(id.opponent());
                match (winner.is_computer(), loser.is_computer()) {
                    (false, true) => "Game over! You won!".to_string(),
                    (true, false) => "Game over! AI won!".to_string(),
                    _ => format!("Game over! {} won!", winner.name()),
                }
            }
            None => {
                if self.player(self.state.current_player()).is_computer() {
                    "Waiting for AI...".to_string()
                } else {
                    "Your turn!".to_string()
                }
            }
        }
    }

    fn index(id: PlayerId) -> usize {
        id.number() as usize - 1
    }
}
