//! Error types for position setup and move notation.

use thiserror::Error;

/// Reasons a FEN string is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 fields, found {found}")]
    MissingFields { found: usize },

    #[error("board must have 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece character '{ch}'")]
    InvalidPiece { ch: char },

    #[error("invalid side to move '{field}'")]
    InvalidSideToMove { field: String },

    #[error("invalid castling field '{field}'")]
    InvalidCastling { field: String },

    #[error("invalid en passant square '{field}'")]
    InvalidEnPassant { field: String },

    #[error("invalid {name} '{field}'")]
    InvalidCounter { name: &'static str, field: String },

    #[error("{color} must have exactly one king, found {found}")]
    KingCount { color: &'static str, found: usize },

    #[error("pawn on back rank at {square}")]
    PawnOnBackRank { square: String },

    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Reasons a UCI move string cannot be resolved against a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("malformed move '{text}'")]
    Malformed { text: String },

    #[error("move '{text}' is not legal in this position")]
    Illegal { text: String },
}
