//! The abstract capability shared by two-player, perfect-information,
//! zero-sum, turn-alternating games
//!
//! The search engine only talks to games through [`TwoPlayerGame`], so any
//! game with a finite move set per turn can be searched without touching
//! [`Negamax`](crate::solver::Negamax).

use std::fmt::{self, Debug, Display};

use crate::error::MoveError;

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The player number as shown to humans, 1 or 2
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(PlayerId::One),
            2 => Some(PlayerId::Two),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Result of a finished game
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Winner(PlayerId),
    Draw,
}

/// A two-player game that can be explored by the search engine
///
/// Moving and switching the player to act are separate primitives: the
/// search decides exactly when the perspective flips. Exploration works on
/// clones, so implementors must make `clone` a deep, independent copy.
pub trait TwoPlayerGame: Clone {
    type Move: Copy + Eq + Debug;

    /// The player about to move
    fn current_player(&self) -> PlayerId;

    /// Legal moves in a fixed, reproducible order
    fn possible_moves(&self) -> Vec<Self::Move>;

    /// Plays `mv` for the current player without switching turns
    fn make_move(&mut self, mv: Self::Move) -> Result<(), MoveError>;

    /// Hands the turn to the other player
    fn switch_player(&mut self);

    /// Whether the game has been won or drawn
    fn is_over(&self) -> bool;

    /// Static evaluation from `player`'s point of view, more negative is worse
    fn static_score(&self, player: PlayerId) -> i32;

    fn opponent(&self) -> PlayerId {
        self.current_player().opponent()
    }

    /// Plays `mv` and passes the turn to the opponent
    fn play_move(&mut self, mv: Self::Move) -> Result<(), MoveError> {
        self.make_move(mv)?;
        self.switch_player();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_flips() {
        assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
        assert_eq!(PlayerId::Two.opponent().opponent(), PlayerId::Two);
    }

    #[test]
    fn numbers_round_trip() {
        assert_eq!(PlayerId::from_number(1), Some(PlayerId::One));
        assert_eq!(PlayerId::from_number(2).map(PlayerId::number), Some(2));
        assert_eq!(PlayerId::from_number(0), None);
        assert_eq!(PlayerId::from_number(3), None);
    }
}
