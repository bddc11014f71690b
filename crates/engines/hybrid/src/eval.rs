//! Deterministic positional heuristic
//!
//! Used as the fallback when no judgment is available and as the move
//! ordering key. Scores are White-positive and bounded.

use chess_core::{Bitboard, Color, PieceKind, Position, legal_moves};

/// Upper bound of every score; a White checkmate.
pub const MAX_EVAL: f64 = 10.0;
/// Lower bound of every score; a Black checkmate.
pub const MIN_EVAL: f64 = -10.0;

pub const CENTER_CONTROL_BONUS: f64 = 0.1;
pub const DEVELOPMENT_BONUS: f64 = 0.2;
pub const MOBILITY_BONUS: f64 = 0.2;

/// Development only counts while `fullmove_number` is at most this.
pub const OPENING_MOVES: u32 = 10;

/// Pieces that carry material value, in report order.
pub const MATERIAL_PIECES: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// Material value in pawns. Kings are not counted.
#[inline]
pub fn piece_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight | PieceKind::Bishop => 3.0,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 0.0,
    }
}

#[inline]
pub fn clamp_eval(score: f64) -> f64 {
    score.clamp(MIN_EVAL, MAX_EVAL)
}

/// Evaluates the position from White's perspective.
///
/// Returns a score in pawns, clamped to `[MIN_EVAL, MAX_EVAL]`:
/// - Positive = good for White
/// - Negative = good for Black
pub fn evaluate(pos: &Position) -> f64 {
    let mut score = material(pos, Color::White) - material(pos, Color::Black);

    for sq in Bitboard::CENTER.squares() {
        let white = pos.attackers(sq, Color::White).popcount();
        let black = pos.attackers(sq, Color::Black).popcount();
        score += CENTER_CONTROL_BONUS * (white as f64 - black as f64);
    }

    if pos.fullmove_number <= OPENING_MOVES {
        score += DEVELOPMENT_BONUS * (developed(pos, Color::White) - developed(pos, Color::Black));
    }

    let mobility = MOBILITY_BONUS * legal_moves(pos).len() as f64;
    score += match pos.side_to_move {
        Color::White => mobility,
        Color::Black => -mobility,
    };

    clamp_eval(score)
}

/// Sum of piece values for one side.
pub fn material(pos: &Position, color: Color) -> f64 {
    MATERIAL_PIECES
        .iter()
        .map(|&kind| pos.count(color, kind) as f64 * piece_value(kind))
        .sum()
}

/// Knights and bishops that have left their own first two ranks.
fn developed(pos: &Position, color: Color) -> f64 {
    let out_of_camp = |sq: u8| match color {
        Color::White => sq / 8 > 1,
        Color::Black => sq / 8 < 6,
    };
    (pos.pieces(color, PieceKind::Knight) | pos.pieces(color, PieceKind::Bishop))
        .squares()
        .filter(|&sq| out_of_camp(sq))
        .count() as f64
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
