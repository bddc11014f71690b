//! Structured summary of a position, rendered into the judgment prompt.

use std::fmt;

use chess_core::{Bitboard, Color, Position, legal_moves};

use crate::eval::{MATERIAL_PIECES, OPENING_MOVES};

/// More pieces than this (kings included) after the opening is a middlegame.
pub const MIDDLEGAME_PIECES: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Middlegame,
    Endgame,
}

impl Phase {
    pub fn of(pos: &Position) -> Phase {
        if pos.fullmove_number <= OPENING_MOVES {
            Phase::Opening
        } else if pos.piece_count() > MIDDLEGAME_PIECES {
            Phase::Middlegame
        } else {
            Phase::Endgame
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Opening => "Opening",
            Phase::Middlegame => "Middlegame",
            Phase::Endgame => "Endgame",
        })
    }
}

/// Per-side facts that go into the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideReport {
    /// Piece counts, pawn to queen, e.g. `8 P, 2 N, 2 B, 2 R, 1 Q`.
    pub material: String,
    /// Central squares attacked at least once.
    pub center_squares: u32,
    pub can_castle: bool,
}

impl SideReport {
    fn of(pos: &Position, color: Color) -> Self {
        let material = MATERIAL_PIECES
            .iter()
            .map(|&kind| {
                let symbol = match color {
                    Color::White => kind.symbol().to_ascii_uppercase(),
                    Color::Black => kind.symbol(),
                };
                format!("{} {}", pos.count(color, kind), symbol)
            })
            .collect::<Vec<_>>()
            .join(", ");
        let center_squares = Bitboard::CENTER
            .squares()
            .filter(|&sq| pos.is_square_attacked(sq, color))
            .count() as u32;
        Self {
            material,
            center_squares,
            can_castle: pos.castling.any(color),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionReport {
    pub fen: String,
    pub white: SideReport,
    pub black: SideReport,
    pub turn: Color,
    pub phase: Phase,
    pub legal_moves: usize,
}

impl PositionReport {
    pub fn new(pos: &Position) -> Self {
        Self {
            fen: pos.to_fen(),
            white: SideReport::of(pos, Color::White),
            black: SideReport::of(pos, Color::Black),
            turn: pos.side_to_move,
            phase: Phase::of(pos),
            legal_moves: legal_moves(pos).len(),
        }
    }

    /// The completion prompt asking for a single White-positive number.
    pub fn prompt(&self) -> String {
        let castling = |side: &SideReport| if side.can_castle { "can" } else { "cannot" };
        format!(
            "You evaluate chess positions. Answer with one decimal number from -10.0 to 10.0 and nothing else.\n\
             Positive means White is better, negative means Black is better, 0.0 is equal.\n\
             \n\
             FEN: {fen}\n\
             \n\
             Material\n\
             \x20  White: {white_material}\n\
             \x20  Black: {black_material}\n\
             \n\
             Position\n\
             \x20  - Turn: {turn}\n\
             \x20  - Center Control: White={white_center}, Black={black_center}\n\
             \x20  - Castling: White={white_castling}, Black={black_castling}\n\
             \x20  - Phase: {phase}\n\
             \x20  - Legal Moves: {legal}\n\
             \n\
             Weigh material (pawn=1, knight=3, bishop=3, rook=5, queen=9), center control, \
             king safety, pawn structure, development and mobility.\n\
             Evaluation:",
            fen = self.fen,
            white_material = self.white.material,
            black_material = self.black.material,
            turn = self.turn.name(),
            white_center = self.white.center_squares,
            black_center = self.black.center_squares,
            white_castling = castling(&self.white),
            black_castling = castling(&self.black),
            phase = self.phase,
            legal = self.legal_moves,
        )
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
