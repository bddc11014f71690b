use crate::{board::Position, movegen::legal_moves};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&pos.apply(mv), depth - 1))
        .sum()
}

/// Per-root-move node counts, in generation order.
pub fn divide(pos: &Position, depth: u8) -> Vec<(String, u64)> {
    legal_moves(pos)
        .into_iter()
        .map(|mv| {
            let nodes = perft(&pos.apply(mv), depth.saturating_sub(1));
            (mv.to_string(), nodes)
        })
        .collect()
}
