//! Forsyth-Edwards Notation parsing and serialization.

use crate::{
    board::{CastlingRights, Position},
    error::FenError,
    types::*,
};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parses and validates a FEN string.
    ///
    /// The halfmove clock and fullmove number may be omitted (they default
    /// to 0 and 1, as in EPD records). Beyond syntax, the position must
    /// have one king per side, no pawns on the back ranks, an en passant
    /// square that matches a pawn which just double-stepped, and the side
    /// that just moved must not be left in check.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields { found: parts.len() });
        }

        let board = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    field: other.to_string(),
                });
            }
        };

        let castling = parse_castling(parts[2])?;

        let en_passant = match parts[3] {
            "-" => None,
            field => {
                let square = coord_to_sq(field).filter(|&s| matches!(rank_of(s), 2 | 5));
                match square {
                    Some(s) => Some(s),
                    None => {
                        return Err(FenError::InvalidEnPassant {
                            field: field.to_string(),
                        });
                    }
                }
            }
        };

        let halfmove_clock = parse_counter(parts.get(4).copied(), "halfmove clock", 0)?;
        let fullmove_number = parse_counter(parts.get(5).copied(), "fullmove number", 1)?.max(1);

        let pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };
        validate(&pos)?;
        Ok(pos)
    }

    /// Serializes the position back to FEN.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                let square = (rank * 8 + file) as u8;
                match self.piece_at(square) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights = [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ];
        let before = out.len();
        for (_, ch) in rights.iter().filter(|(on, _)| *on) {
            out.push(*ch);
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(s) => out.push_str(&sq_to_coord(s)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

fn parse_placement(field: &str) -> Result<[Option<Piece>; 64], FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    let mut board = [None; 64];
    // FEN lists rank 8 first.
    for (idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - idx as i8;
        let mut file: i8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                if d == 0 || d > 8 {
                    return Err(FenError::RankWidth { rank: 8 - idx });
                }
                file += d as i8;
            } else {
                let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece { ch })?;
                let square = sq(file, rank).ok_or(FenError::RankWidth { rank: 8 - idx })?;
                board[square as usize] = Some(piece);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth { rank: 8 - idx });
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth { rank: 8 - idx });
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for ch in field.chars() {
        let flag = match ch {
            'K' => &mut rights.wk,
            'Q' => &mut rights.wq,
            'k' => &mut rights.bk,
            'q' => &mut rights.bq,
            _ => {
                return Err(FenError::InvalidCastling {
                    field: field.to_string(),
                });
            }
        };
        *flag = true;
    }
    Ok(rights)
}

fn parse_counter(field: Option<&str>, name: &'static str, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| FenError::InvalidCounter {
            name,
            field: text.to_string(),
        }),
    }
}

fn validate(pos: &Position) -> Result<(), FenError> {
    for color in [Color::White, Color::Black] {
        let kings = pos.count(color, PieceKind::King) as usize;
        if kings != 1 {
            return Err(FenError::KingCount {
                color: color.name(),
                found: kings,
            });
        }
    }

    for square in (0..8).chain(56..64) {
        if let Some(pc) = pos.piece_at(square)
            && pc.kind == PieceKind::Pawn
        {
            return Err(FenError::PawnOnBackRank {
                square: sq_to_coord(square),
            });
        }
    }

    if let Some(target) = pos.en_passant
        && !en_passant_consistent(pos, target)
    {
        return Err(FenError::InvalidEnPassant {
            field: sq_to_coord(target),
        });
    }

    if pos.in_check(pos.side_to_move.other()) {
        return Err(FenError::OpponentInCheck);
    }

    Ok(())
}

/// The en passant target must sit on the side to move's capture rank,
/// be empty, and have the pawn that just double-stepped right behind it.
fn en_passant_consistent(pos: &Position, target: u8) -> bool {
    let us = pos.side_to_move;
    let them = us.other();
    if rank_of(target) != us.home_rank() + 5 * us.forward() || pos.piece_at(target).is_some() {
        return false;
    }
    sq(file_of(target), rank_of(target) - us.forward())
        .and_then(|s| pos.piece_at(s))
        .is_some_and(|pc| pc == Piece::new(them, PieceKind::Pawn))
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
