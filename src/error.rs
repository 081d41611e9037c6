//! Error types for the game core

use thiserror::Error;

/// A move that cannot be played on the current board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid move, column {column} out of range. Columns must be below {width}")]
    OutOfRange { column: usize, width: usize },

    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },
}

/// Errors raised by the search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no legal move available, the game is already over")]
    NoLegalMove,
}

/// Malformed configuration, rejected before any search starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u32),

    #[error("invalid board size {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("win length {win_length} does not fit a {width}x{height} board")]
    InvalidWinLength {
        win_length: usize,
        width: usize,
        height: usize,
    },

    #[error("unknown difficulty '{0}', expected easy, medium or hard")]
    UnknownDifficulty(String),
}
