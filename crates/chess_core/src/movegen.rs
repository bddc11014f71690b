use crate::{
    board::{DIAGONALS, KING_STEPS, KNIGHT_JUMPS, ORTHOGONALS, Position},
    types::*,
};

/// All legal moves for the side to move, in generation order.
///
/// Generation order is deterministic (by origin square, then direction),
/// which keeps stable sorts downstream reproducible.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_moves(pos, &mut out);

    let mover = pos.side_to_move;
    out.retain(|&mv| !pos.apply(mv).in_check(mover));
    out
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else { continue };
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => pawn_moves(pos, from, us, out),
            PieceKind::Knight => leaps(pos, from, us, &KNIGHT_JUMPS, out),
            PieceKind::Bishop => slides(pos, from, us, &DIAGONALS, out),
            PieceKind::Rook => slides(pos, from, us, &ORTHOGONALS, out),
            PieceKind::Queen => {
                slides(pos, from, us, &DIAGONALS, out);
                slides(pos, from, us, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                leaps(pos, from, us, &KING_STEPS, out);
                castles(pos, from, us, out);
            }
        }
    }
}

fn push_pawn_move(from: u8, to: u8, us: Color, out: &mut Vec<Move>) {
    let last_rank = us.other().home_rank();
    if rank_of(to) == last_rank {
        out.extend(
            PieceKind::PROMOTIONS
                .iter()
                .map(|&kind| Move::promotion(from, to, kind)),
        );
    } else {
        out.push(Move::new(from, to));
    }
}

fn pawn_moves(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let (f, r) = (file_of(from), rank_of(from));
    let dir = us.forward();
    let start_rank = us.home_rank() + dir;

    if let Some(one) = sq(f, r + dir)
        && pos.piece_at(one).is_none()
    {
        push_pawn_move(from, one, us, out);
        if r == start_rank
            && let Some(two) = sq(f, r + 2 * dir)
            && pos.piece_at(two).is_none()
        {
            out.push(Move::new(from, two));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else { continue };
        match pos.piece_at(to) {
            Some(target) if target.color != us => push_pawn_move(from, to, us, out),
            None if pos.en_passant == Some(to) => out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            }),
            _ => {}
        }
    }
}

fn leaps(pos: &Position, from: u8, us: Color, steps: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f, r) = (file_of(from), rank_of(from));
    for (df, dr) in steps {
        let Some(to) = sq(f + df, r + dr) else { continue };
        if pos.piece_at(to).is_none_or(|pc| pc.color != us) {
            out.push(Move::new(from, to));
        }
    }
}

fn slides(pos: &Position, from: u8, us: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f0, r0) = (file_of(from), rank_of(from));
    for (df, dr) in dirs {
        let (mut f, mut r) = (f0 + df, r0 + dr);
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != us {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

/// Castling: king on its home square, right still held, the squares
/// between king and rook empty, and the king neither in check nor passing
/// through or landing on an attacked square.
fn castles(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let rank = us.home_rank();
    if sq(4, rank) != Some(from) || pos.in_check(us) {
        return;
    }
    let (king_side, queen_side) = match us {
        Color::White => (pos.castling.wk, pos.castling.wq),
        Color::Black => (pos.castling.bk, pos.castling.bq),
    };
    let them = us.other();

    // (right held, rook file, files that must be empty, files the king crosses, king target file)
    let wings: [(bool, i8, &[i8], [i8; 2], i8); 2] = [
        (king_side, 7, &[5, 6], [5, 6], 6),
        (queen_side, 0, &[1, 2, 3], [3, 2], 2),
    ];
    for (held, rook_file, empty, crossed, target) in wings {
        if !held {
            continue;
        }
        let rook_home = sq(rook_file, rank).and_then(|s| pos.piece_at(s));
        if rook_home != Some(Piece::new(us, PieceKind::Rook)) {
            continue;
        }
        let clear = empty
            .iter()
            .filter_map(|&file| sq(file, rank))
            .all(|s| pos.piece_at(s).is_none());
        let safe = crossed
            .iter()
            .filter_map(|&file| sq(file, rank))
            .all(|s| !pos.is_square_attacked(s, them));
        if clear
            && safe
            && let Some(to) = sq(target, rank)
        {
            out.push(Move {
                is_castle: true,
                ..Move::new(from, to)
            });
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
