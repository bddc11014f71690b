//! Leaf evaluation strategies used at the search frontier.

use chess_core::{Color, Position};
use tracing::{error, warn};

use crate::{
    eval::{clamp_eval, evaluate},
    judge::{JudgmentService, ResponseBudget, parse_judgment},
    report::PositionReport,
};

/// Scores a frontier position, White-positive, within `[MIN_EVAL, MAX_EVAL]`.
///
/// Never fails: a strategy that cannot produce its own score falls back
/// to the heuristic.
pub trait LeafEvaluator {
    fn evaluate(&self, pos: &Position) -> f64;
}

impl<L: LeafEvaluator + ?Sized> LeafEvaluator for Box<L> {
    fn evaluate(&self, pos: &Position) -> f64 {
        (**self).evaluate(pos)
    }
}

/// The deterministic heuristic alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicLeaf;

impl LeafEvaluator for HeuristicLeaf {
    fn evaluate(&self, pos: &Position) -> f64 {
        evaluate(pos)
    }
}

/// Asks a judgment service, falling back to the heuristic on any failure.
pub struct JudgedLeaf<J> {
    judge: J,
    budget: ResponseBudget,
    turn_adjustment: f64,
}

impl<J: JudgmentService> JudgedLeaf<J> {
    pub fn new(judge: J) -> Self {
        Self {
            judge,
            budget: ResponseBudget::default(),
            turn_adjustment: 0.2,
        }
    }

    pub fn with_budget(mut self, budget: ResponseBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_turn_adjustment(mut self, adjustment: f64) -> Self {
        self.turn_adjustment = adjustment;
        self
    }
}

impl<J: JudgmentService> LeafEvaluator for JudgedLeaf<J> {
    fn evaluate(&self, pos: &Position) -> f64 {
        let report = PositionReport::new(pos);
        let reply = match self.judge.complete(&report.prompt(), self.budget) {
            Ok(reply) => reply,
            Err(e) => {
                error!(fen = %report.fen, error = %e, "judgment request failed, using heuristic");
                return evaluate(pos);
            }
        };

        let Some(mut score) = parse_judgment(&reply) else {
            warn!(fen = %report.fen, reply = %reply.trim(), "unusable judgment, using heuristic");
            return evaluate(pos);
        };
        if pos.side_to_move == Color::Black {
            score -= self.turn_adjustment;
        }
        clamp_eval(score)
    }
}

#[cfg(test)]
#[path = "leaf_tests.rs"]
mod leaf_tests;
