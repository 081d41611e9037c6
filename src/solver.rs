//! Depth-limited negamax search over any [`TwoPlayerGame`]

use log::debug;

use crate::difficulty::Difficulty;
use crate::error::{ConfigError, SearchError};
use crate::game::{PlayerId, TwoPlayerGame};

/// Bound used for the search window. Its negation is still representable.
pub const INFINITY: i32 = i32::MAX;

/// How leaf positions are scored
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Evaluation {
    /// The game's static score as is: a loss is a flat sentinel, everything
    /// else 0. Wins found at different depths score the same.
    Coarse,
    /// Negative static scores are pushed further down by the remaining
    /// depth, so a loss found sooner is worse and, seen from the other side,
    /// a sooner win is better.
    DepthAware,
}

impl Default for Evaluation {
    fn default() -> Self {
        Evaluation::Coarse
    }
}

/// An agent choosing moves by depth-limited negamax
///
/// # Notes
/// Negamax scores every position from the point of view of the player to
/// act and negates child scores at each ply, which is minimax for zero-sum
/// games. Hypothetical continuations are explored on clones of the state,
/// never by mutating the caller's state.
///
/// Among moves with equal score the first one in the game's move order wins,
/// so the chosen move is reproducible. Alpha-beta pruning (on by default)
/// keeps that property: a root move only replaces the current best when its
/// score is strictly greater, and any such score is computed exactly inside
/// the window.
#[derive(Clone, Debug)]
pub struct Negamax {
    depth: u32,
    pruning: bool,
    evaluation: Evaluation,

    /// The number of nodes searched by this `Negamax` so far (for diagnostics only)
    pub node_count: usize,
}

impl Negamax {
    /// Creates a new engine searching `depth` plies ahead
    pub fn new(depth: u32) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(ConfigError::InvalidDepth(depth));
        }
        Ok(Self {
            depth,
            pruning: true,
            evaluation: Evaluation::default(),
            node_count: 0,
        })
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            depth: difficulty.depth(),
            pruning: true,
            evaluation: Evaluation::default(),
            node_count: 0,
        }
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u32) -> Result<(), ConfigError> {
        if depth == 0 {
            return Err(ConfigError::InvalidDepth(depth));
        }
        self.depth = depth;
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.depth = difficulty.depth();
    }

    /// Best move for the player to act at the configured depth
    pub fn best_move<G: TwoPlayerGame>(&mut self, state: &G) -> Result<G::Move, SearchError> {
        self.choose_move(state, self.depth)
    }

    /// Best move for the player to act, looking `depth` plies ahead
    pub fn choose_move<G: TwoPlayerGame>(
        &mut self,
        state: &G,
        depth: u32,
    ) -> Result<G::Move, SearchError> {
        self.search(state, depth).map(|(_, best_move)| best_move)
    }

    /// Performs a top-level search
    ///
    /// Returns the score of the position for the player to act and the move
    /// achieving it. With `depth == 0`, or on a finished game, nothing is
    /// explored: the static score and the first legal move are returned.
    pub fn search<G: TwoPlayerGame>(
        &mut self,
        state: &G,
        depth: u32,
    ) -> Result<(i32, G::Move), SearchError> {
        let acting = state.current_player();
        let moves = state.possible_moves();
        let first = *moves.first().ok_or(SearchError::NoLegalMove)?;

        if depth == 0 || state.is_over() {
            return Ok((self.evaluate(state, acting, depth), first));
        }

        let start_count = self.node_count;
        let mut best_score = -INFINITY;
        let mut best_move = first;
        for candidate in moves {
            let child = match Self::child(state, candidate) {
                Some(child) => child,
                None => continue,
            };
            let score = if self.pruning {
                -self.alpha_beta(&child, depth - 1, acting.opponent(), -INFINITY, -best_score)
            } else {
                -self.negamax(&child, depth - 1, acting.opponent())
            };
            debug!("{} move {:?}: score {}", acting, candidate, score);

            if score > best_score {
                best_score = score;
                best_move = candidate;
            }
        }

        debug!(
            "{} chose {:?} (score {}, depth {}, {} nodes)",
            acting,
            best_move,
            best_score,
            depth,
            self.node_count - start_count
        );
        Ok((best_score, best_move))
    }

    /// Plain negamax, every branch explored
    fn negamax<G: TwoPlayerGame>(&mut self, state: &G, depth: u32, acting: PlayerId) -> i32 {
        self.node_count += 1;

        let moves = state.possible_moves();
        if depth == 0 || moves.is_empty() || state.is_over() {
            return self.evaluate(state, acting, depth);
        }

        let mut best = -INFINITY;
        for candidate in moves {
            if let Some(child) = Self::child(state, candidate) {
                best = best.max(-self.negamax(&child, depth - 1, acting.opponent()));
            }
        }
        best
    }

    /// Fail-soft alpha-beta: exact inside `(alpha, beta)`, a bound outside it
    fn alpha_beta<G: TwoPlayerGame>(
        &mut self,
        state: &G,
        depth: u32,
        acting: PlayerId,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.node_count += 1;

        let moves = state.possible_moves();
        if depth == 0 || moves.is_empty() || state.is_over() {
            return self.evaluate(state, acting, depth);
        }

        let mut best = -INFINITY;
        for candidate in moves {
            let child = match Self::child(state, candidate) {
                Some(child) => child,
                None => continue,
            };
            // the search window is flipped for the other player
            let score = -self.alpha_beta(&child, depth - 1, acting.opponent(), -beta, -alpha);
            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            // the opponent will never let the game reach this branch
            if alpha >= beta {
                break;
            }
        }
        best
    }

    fn evaluate<G: TwoPlayerGame>(&self, state: &G, acting: PlayerId, remaining_depth: u32) -> i32 {
        let score = state.static_score(acting);
        match self.evaluation {
            Evaluation::DepthAware if score < 0 => score - remaining_depth as i32,
            _ => score,
        }
    }

    // possible_moves only yields playable moves, so a failure here means the
    // game broke its own contract; the move is skipped rather than searched
    fn child<G: TwoPlayerGame>(state: &G, candidate: G::Move) -> Option<G> {
        let mut child = state.clone();
        child.play_move(candidate).ok()?;
        Some(child)
    }
}

impl Default for Negamax {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect_four::{GameState, LOSS_SCORE};
    use crate::error::MoveError;
    use anyhow::Result;

    /// Take one to three stones, whoever takes the last stone wins
    #[derive(Clone)]
    struct TakeAway {
        stones: u32,
        to_move: PlayerId,
    }

    impl TwoPlayerGame for TakeAway {
        type Move = u32;

        fn current_player(&self) -> PlayerId {
            self.to_move
        }

        fn possible_moves(&self) -> Vec<u32> {
            (1..=3).filter(|&take| take <= self.stones).collect()
        }

        fn make_move(&mut self, take: u32) -> Result<(), MoveError> {
            if take == 0 || take > 3 || take > self.stones {
                return Err(MoveError::OutOfRange {
                    column: take as usize,
                    width: 4,
                });
            }
            self.stones -= take;
            Ok(())
        }

        fn switch_player(&mut self) {
            self.to_move = self.to_move.opponent();
        }

        fn is_over(&self) -> bool {
            self.stones == 0
        }

        fn static_score(&self, _player: PlayerId) -> i32 {
            // the acting player faces an empty pile: the opponent took the last stone
            if self.stones == 0 {
                LOSS_SCORE
            } else {
                0
            }
        }
    }

    #[test]
    fn rejects_zero_depth() {
        assert_eq!(Negamax::new(0).unwrap_err(), ConfigError::InvalidDepth(0));
        let mut engine = Negamax::default();
        assert!(engine.set_depth(0).is_err());
        assert_eq!(engine.depth(), 5);
    }

    #[test]
    fn generic_over_games() -> Result<()> {
        let mut engine = Negamax::new(10)?;
        for &(stones, take) in [(5, 1), (6, 2), (7, 3)].iter() {
            let game = TakeAway {
                stones,
                to_move: PlayerId::One,
            };
            assert_eq!(engine.best_move(&game)?, take);
        }
        Ok(())
    }

    #[test]
    fn takes_immediate_win() -> Result<()> {
        // both players have three stacked, player 1 to move completes column 4
        let state = GameState::from_moves(7, 6, 4, "414141")?;
        for depth in 1..=4 {
            let mut engine = Negamax::new(depth)?;
            let (score, column) = engine.search(&state, depth)?;
            assert_eq!(column, 3, "depth {}", depth);
            assert_eq!(score, -LOSS_SCORE);
        }
        Ok(())
    }

    #[test]
    fn blocking_needs_two_plies() -> Result<()> {
        // player 2 has three stacked in column 1, player 1 has no win
        let state = GameState::from_moves(7, 6, 4, "414151")?;

        // one ply does not see the reply, every move scores 0 and the first wins the tie
        let mut shallow = Negamax::new(1)?;
        assert_eq!(shallow.search(&state, 1)?, (0, 0));

        // ignoring the threat hands player 2 the win
        let mut careless = state.clone();
        careless.play_move(6)?;
        assert_eq!(shallow.search(&careless, 1)?, (-LOSS_SCORE, 0));

        // two plies or more see the reply, only column 1 avoids the loss
        for depth in 2..=3 {
            let mut engine = Negamax::new(depth)?;
            assert_eq!(engine.search(&state, depth)?, (0, 0), "depth {}", depth);
            let mut full = Negamax::new(depth)?.with_pruning(false);
            let mut scores = Vec::new();
            for column in state.legal_moves() {
                let mut child = state.clone();
                child.play_move(column)?;
                scores.push(-full.search(&child, depth - 1)?.0);
            }
            assert_eq!(scores[0], 0);
            assert!(scores[1..].iter().all(|&score| score == LOSS_SCORE));
        }
        Ok(())
    }

    #[test]
    fn blocks_opponent_threat() -> Result<()> {
        // player 1 threatens to complete the bottom row in column 4
        let state = GameState::from_moves(7, 6, 4, "17273")?;
        let mut engine = Negamax::new(2)?;
        assert_eq!(engine.best_move(&state)?, 3);
        Ok(())
    }

    #[test]
    fn zero_depth_returns_first_legal_move() -> Result<()> {
        let state = GameState::from_moves(7, 6, 4, "111111")?;
        let mut engine = Negamax::default();
        assert_eq!(engine.choose_move(&state, 0)?, 1);
        assert_eq!(engine.node_count, 0);
        Ok(())
    }

    #[test]
    fn no_legal_move_on_full_board() -> Result<()> {
        let mut state = GameState::with_win_length(2, 2, 2)?;
        // legality only looks at free cells, so the board can be filled past a win
        state.play_move(0)?;
        state.play_move(0)?;
        state.play_move(1)?;
        state.play_move(1)?;
        assert!(state.legal_moves().is_empty());
        let mut engine = Negamax::default();
        assert_eq!(engine.best_move(&state), Err(SearchError::NoLegalMove));
        Ok(())
    }

    #[test]
    fn terminal_root_still_scores() -> Result<()> {
        let state = GameState::from_moves(7, 6, 4, "1212121")?;
        let mut engine = Negamax::new(3)?;
        let (score, _) = engine.search(&state, 3)?;
        assert_eq!(score, LOSS_SCORE);
        Ok(())
    }

    #[test]
    fn repeated_searches_agree() -> Result<()> {
        let state = GameState::from_moves(7, 6, 4, "4453")?;
        let mut engine = Negamax::new(4)?;
        let first = engine.best_move(&state)?;
        for _ in 0..3 {
            assert_eq!(engine.best_move(&state)?, first);
        }
        Ok(())
    }

    #[test]
    fn pruning_visits_fewer_nodes() -> Result<()> {
        let state = GameState::from_moves(7, 6, 4, "4453")?;
        let mut pruned = Negamax::new(4)?;
        let mut full = Negamax::new(4)?.with_pruning(false);
        assert_eq!(pruned.search(&state, 4)?, full.search(&state, 4)?);
        assert!(pruned.node_count < full.node_count);
        Ok(())
    }

    #[test]
    fn depth_aware_prefers_the_quicker_win() -> Result<()> {
        // player 1 has three stacked in columns 4 and 6: column 4 wins now,
        // while column 1 keeps both threats and wins a move later
        let state = GameState::from_moves(7, 6, 4, "414241626767")?;
        let mut coarse = Negamax::new(3)?;
        let mut aware = Negamax::new(3)?.with_evaluation(Evaluation::DepthAware);

        assert_eq!(coarse.search(&state, 3)?, (-LOSS_SCORE, 0));
        assert_eq!(aware.search(&state, 3)?, (-LOSS_SCORE + 2, 3));
        Ok(())
    }
}
