//! Negamax search with alpha-beta pruning

use std::cmp::Ordering;

use chess_core::{Color, Move, Position, legal_moves};
use tracing::debug;

use crate::{
    budget::SearchBudget,
    error::SearchError,
    eval::MAX_EVAL,
    leaf::LeafEvaluator,
    ordering::order_moves,
    result::EvaluationLine,
};

/// Per-call search state. One context serves exactly one search.
pub struct SearchContext<'a> {
    leaf: &'a dyn LeafEvaluator,
    budget: SearchBudget,
    nodes: u64,
}

impl<'a> SearchContext<'a> {
    pub fn new(leaf: &'a dyn LeafEvaluator, budget: SearchBudget) -> Self {
        Self {
            leaf,
            budget,
            nodes: 0,
        }
    }

    /// Positions analyzed so far: every move played inside the tree.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

/// What a completed search found, White-positive.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub evaluation: f64,
    /// Root lines, best for the side to move first. Empty for a terminal
    /// root or depth 0.
    pub lines: Vec<EvaluationLine>,
    pub nodes: u64,
}

/// A line scored from the point of view of the side to move at its node.
struct Line {
    mv: Move,
    score: f64,
    continuation: Vec<Move>,
}

struct Node {
    value: f64,
    lines: Vec<Line>,
}

impl Node {
    fn leaf(value: f64) -> Self {
        Self {
            value,
            lines: Vec::new(),
        }
    }

    /// The best line's move followed by its own continuation.
    fn principal(mut self) -> Vec<Move> {
        if self.lines.is_empty() {
            return Vec::new();
        }
        let best = self.lines.swap_remove(0);
        let mut pv = Vec::with_capacity(best.continuation.len() + 1);
        pv.push(best.mv);
        pv.extend(best.continuation);
        pv
    }
}

/// +1 when White moves, -1 when Black moves.
#[inline]
fn perspective(color: Color) -> f64 {
    match color {
        Color::White => 1.0,
        Color::Black => -1.0,
    }
}

/// Converts a mover-relative score to White-positive. Never yields `-0.0`.
#[inline]
fn for_white(mover: Color, score: f64) -> f64 {
    let white = perspective(mover) * score;
    if white == 0.0 { 0.0 } else { white }
}

/// Searches `depth` plies below `pos`.
///
/// Depth 0 returns the leaf score alone, whatever the position. Above the
/// frontier, a side with no legal moves scores as mated or stalemated.
pub fn search(
    pos: &Position,
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> Result<SearchOutcome, SearchError> {
    ctx.budget.start();
    let node = negamax(pos, depth, f64::NEG_INFINITY, f64::INFINITY, 0, ctx)?;

    let mover = pos.side_to_move;
    let lines = node
        .lines
        .into_iter()
        .map(|line| EvaluationLine {
            mv: line.mv,
            evaluation: for_white(mover, line.score),
            continuation: line.continuation,
        })
        .collect();

    Ok(SearchOutcome {
        evaluation: for_white(mover, node.value),
        lines,
        nodes: ctx.nodes,
    })
}

/// Recursive negamax search with alpha-beta pruning.
///
/// Scores are relative to the side to move at `pos`.
fn negamax(
    pos: &Position,
    depth: u8,
    mut alpha: f64,
    beta: f64,
    ply: u32,
    ctx: &mut SearchContext<'_>,
) -> Result<Node, SearchError> {
    if ctx.budget.exhausted(ctx.nodes) {
        return Err(SearchError::Aborted { nodes: ctx.nodes });
    }

    if depth == 0 {
        let white = ctx.leaf.evaluate(pos);
        return Ok(Node::leaf(perspective(pos.side_to_move) * white));
    }

    let moves = legal_moves(pos);
    if moves.is_empty() {
        if pos.in_check(pos.side_to_move) {
            return Ok(Node::leaf(-MAX_EVAL)); // Checkmate
        }
        return Ok(Node::leaf(0.0)); // Stalemate
    }

    if ply > 0 && (pos.is_insufficient_material() || pos.is_seventy_five_move_draw()) {
        return Ok(Node::leaf(0.0));
    }

    let mut lines = Vec::with_capacity(moves.len());
    let mut best = f64::NEG_INFINITY;

    for (mv, child) in order_moves(pos, moves) {
        ctx.nodes += 1;
        debug!(ply, depth, mv = %mv, nodes = ctx.nodes, "analyzing");

        let reply = negamax(&child, depth - 1, -beta, -alpha, ply + 1, ctx)?;
        let score = -reply.value;
        lines.push(Line {
            mv,
            score,
            continuation: reply.principal(),
        });

        best = best.max(score);
        alpha = alpha.max(best);
        if beta <= alpha {
            debug!(ply, depth, "cutoff");
            break; // Beta cutoff
        }
    }

    // Stable: equal scores keep exploration order.
    lines.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    let value = lines.first().map_or(0.0, |l| l.score);
    Ok(Node { value, lines })
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
