//! Ranked candidate lines and the final evaluation payload.

use chess_core::Move;
use serde::Serialize;

use crate::error::EvaluationError;

/// Number of root lines a result keeps unless configured otherwise.
pub const TOP_LINES: usize = 5;

/// One candidate move with its score and the principal continuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationLine {
    #[serde(rename = "move")]
    pub mv: Move,
    /// White-positive.
    pub evaluation: f64,
    pub continuation: Vec<Move>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub best_move: Move,
    /// White-positive.
    pub evaluation: f64,
    pub all_lines: Vec<EvaluationLine>,
    pub nodes: u64,
}

/// Builds the result from the ranked root lines, keeping the first `keep`.
///
/// Lines arrive already ranked best-for-mover first and are not re-sorted.
pub fn assemble(
    evaluation: f64,
    mut lines: Vec<EvaluationLine>,
    nodes: u64,
    keep: usize,
) -> Result<EvaluationResult, EvaluationError> {
    let Some(best) = lines.first() else {
        return Err(EvaluationError::NoValidMoves);
    };
    let best_move = best.mv;
    lines.truncate(keep);
    Ok(EvaluationResult {
        best_move,
        evaluation,
        all_lines: lines,
        nodes,
    })
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod result_tests;
