//! Board representation, FEN handling and legal move generation.
//!
//! Positions are values: [`Position::apply`] returns the successor and
//! leaves the original untouched, so search code can hold any number of
//! them side by side.

pub mod bitboard;
pub mod board;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;

pub use bitboard::*;
pub use board::*;
pub use error::{FenError, MoveParseError};
pub use fen::START_FEN;
pub use movegen::legal_moves;
pub use perft::{divide, perft};
pub use types::*;
pub use uci::*;
