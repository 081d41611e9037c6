//! Computer-vs-computer matches, one game per two-move opening
//!
//! The engine has no randomness, so two engines would replay the same game
//! forever. Forcing each of the `width * width` openings gives a spread of
//! positions instead, and the games are independent so they run in parallel.

use anyhow::Result;
use indicatif::ProgressBar;
use log::info;
use rayon::prelude::*;

use crate::connect_four::GameState;
use crate::game::{Outcome, PlayerId};
use crate::solver::Negamax;

#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub width: usize,
    pub height: usize,
    pub win_length: usize,
    /// Plays as player 1
    pub first: Negamax,
    /// Plays as player 2
    pub second: Negamax,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub opening: [usize; 2],
    /// Every column played, opening included
    pub moves: Vec<usize>,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Default)]
pub struct ArenaReport {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub games: Vec<GameRecord>,
}

impl ArenaReport {
    fn tally(games: Vec<GameRecord>) -> Self {
        let mut report = Self::default();
        for game in games.iter() {
            match game.outcome {
                Outcome::Winner(PlayerId::One) => report.first_wins += 1,
                Outcome::Winner(PlayerId::Two) => report.second_wins += 1,
                Outcome::Draw => report.draws += 1,
            }
        }
        report.games = games;
        report
    }
}

/// Every pair of opening columns, in order
pub fn openings(width: usize) -> Vec<[usize; 2]> {
    (0..width)
        .flat_map(|first| (0..width).map(move |second| [first, second]))
        .collect()
}

/// Plays one game from `opening`, or `None` if the opening cannot be played
/// on this board
pub fn play_game(config: &ArenaConfig, opening: [usize; 2]) -> Result<Option<GameRecord>> {
    let mut state = GameState::with_win_length(config.width, config.height, config.win_length)?;
    let mut moves = Vec::new();

    for &column in opening.iter() {
        if state.is_terminal() || state.apply_move(column).is_err() {
            return Ok(None);
        }
        state.switch_turn();
        moves.push(column);
    }

    let mut engines = [config.first.clone(), config.second.clone()];
    let outcome = loop {
        if let Some(outcome) = state.outcome() {
            break outcome;
        }
        let engine = &mut engines[state.current_player().number() as usize - 1];
        let column = engine.best_move(&state)?;
        state.apply_move(column)?;
        state.switch_turn();
        moves.push(column);
    };

    Ok(Some(GameRecord {
        opening,
        moves,
        outcome,
    }))
}

/// Plays every opening, advancing `progress` once per finished game
pub fn run(config: &ArenaConfig, progress: Option<&ProgressBar>) -> Result<ArenaReport> {
    let games = openings(config.width)
        .into_par_iter()
        .map(|opening| {
            let record = play_game(config, opening);
            if let Some(progress) = progress {
                progress.inc(1);
            }
            record
        })
        .collect::<Result<Vec<_>>>()?;

    let report = ArenaReport::tally(games.into_iter().flatten().collect());
    info!(
        "arena finished: {} games, player 1 won {}, player 2 won {}, {} draws",
        report.games.len(),
        report.first_wins,
        report.second_wins,
        report.draws
    );
    Ok(report)
}
