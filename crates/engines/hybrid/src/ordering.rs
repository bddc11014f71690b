//! Move ordering for alpha-beta.

use std::cmp::Ordering;

use chess_core::{Color, Move, Position};

use crate::eval::evaluate;

/// Pairs each move with its successor and sorts best-for-mover first by
/// the heuristic score of the successor.
///
/// The sort is stable, so moves the heuristic cannot tell apart keep their
/// generation order.
pub fn order_moves(pos: &Position, moves: Vec<Move>) -> Vec<(Move, Position)> {
    let mut scored: Vec<(Move, Position, f64)> = moves
        .into_iter()
        .map(|mv| {
            let child = pos.apply(mv);
            let score = evaluate(&child);
            (mv, child, score)
        })
        .collect();

    let by_score = |a: &f64, b: &f64| a.partial_cmp(b).unwrap_or(Ordering::Equal);
    match pos.side_to_move {
        Color::White => scored.sort_by(|a, b| by_score(&b.2, &a.2)),
        Color::Black => scored.sort_by(|a, b| by_score(&a.2, &b.2)),
    }

    scored
        .into_iter()
        .map(|(mv, child, _)| (mv, child))
        .collect()
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
