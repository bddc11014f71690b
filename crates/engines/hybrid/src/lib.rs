//! Hybrid Chess Engine
//!
//! Alpha-beta look-ahead over a few plies. Frontier positions are scored
//! by a pluggable leaf evaluator: a text-completion service asked for a
//! number, or the deterministic heuristic it falls back to.

pub mod budget;
pub mod config;
pub mod error;
pub mod eval;
pub mod judge;
pub mod leaf;
pub mod ordering;
pub mod report;
pub mod result;
pub mod search;

use std::time::Instant;

use chess_core::{Move, Position, legal_moves, parse_uci_move};
use serde::Serialize;
use tracing::info;

pub use budget::{SearchBudget, StopHandle};
pub use config::{HybridConfig, JudgeConfig, SearchConfig};
pub use error::{ConfigError, EvaluationError, JudgeError, SearchError};
pub use eval::{MAX_EVAL, MIN_EVAL, evaluate};
pub use judge::{CompletionClient, JudgmentService, ResponseBudget};
pub use leaf::{HeuristicLeaf, JudgedLeaf, LeafEvaluator};
pub use result::{EvaluationLine, EvaluationResult, TOP_LINES};
pub use search::{SearchContext, SearchOutcome, search};

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 3;

/// Checks a requested depth before any work is done.
pub fn validate_depth(depth: i64) -> Result<u8, EvaluationError> {
    u8::try_from(depth)
        .ok()
        .filter(|d| (MIN_DEPTH..=MAX_DEPTH).contains(d))
        .ok_or(EvaluationError::DepthOutOfRange { depth })
}

/// The move a bot should play, with the evaluation behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotMove {
    pub best_move: Move,
    pub evaluation: f64,
}

/// Validates requests, runs the search and assembles the result.
pub struct HybridEngine {
    config: HybridConfig,
    leaf: Box<dyn LeafEvaluator>,
}

impl HybridEngine {
    pub fn new(config: HybridConfig, leaf: Box<dyn LeafEvaluator>) -> Self {
        Self { config, leaf }
    }

    /// Heuristic leaves only; no network.
    pub fn heuristic(config: HybridConfig) -> Self {
        Self::new(config, Box::new(HeuristicLeaf))
    }

    /// Leaves judged by `judge`, with the response budget and turn
    /// adjustment taken from `config.judge`.
    pub fn with_judge<J: JudgmentService + 'static>(config: HybridConfig, judge: J) -> Self {
        let leaf = JudgedLeaf::new(judge)
            .with_budget(config.judge.response_budget())
            .with_turn_adjustment(config.judge.turn_adjustment);
        Self::new(config, Box::new(leaf))
    }

    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    /// Full evaluation of the position given as FEN.
    pub fn evaluate(&self, fen: &str, depth: u8) -> Result<EvaluationResult, EvaluationError> {
        let pos = Position::from_fen(fen)?;
        self.evaluate_position(&pos, depth)
    }

    /// Full evaluation of an already parsed position.
    pub fn evaluate_position(
        &self,
        pos: &Position,
        depth: u8,
    ) -> Result<EvaluationResult, EvaluationError> {
        self.evaluate_with(pos, depth, &self.config.search)
    }

    /// Like [`HybridEngine::evaluate_position`], with search limits that
    /// override the configured ones for this call only.
    pub fn evaluate_with(
        &self,
        pos: &Position,
        depth: u8,
        limits: &SearchConfig,
    ) -> Result<EvaluationResult, EvaluationError> {
        let depth = validate_depth(depth.into())?;
        if legal_moves(pos).is_empty() {
            return Err(EvaluationError::NoLegalMoves);
        }

        let fen = pos.to_fen();
        info!(%fen, depth, "starting evaluation");
        let start = Instant::now();

        let mut ctx = SearchContext::new(self.leaf.as_ref(), limits.budget());
        let outcome = search(pos, depth, &mut ctx)?;
        let result = result::assemble(
            outcome.evaluation,
            outcome.lines,
            outcome.nodes,
            limits.top_lines,
        )?;

        info!(
            %fen,
            depth,
            nodes = result.nodes,
            best_move = %result.best_move,
            evaluation = result.evaluation,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "evaluation complete"
        );
        Ok(result)
    }

    /// Evaluates, then re-checks the chosen move against the root position:
    /// it must be legal there and must change the position.
    pub fn bot_move(&self, fen: &str, depth: u8) -> Result<BotMove, EvaluationError> {
        let pos = Position::from_fen(fen)?;
        self.bot_move_position(&pos, depth)
    }

    /// [`HybridEngine::bot_move`] for an already parsed position.
    pub fn bot_move_position(
        &self,
        pos: &Position,
        depth: u8,
    ) -> Result<BotMove, EvaluationError> {
        let result = self.evaluate_position(pos, depth)?;

        let text = result.best_move.to_string();
        let mv = parse_uci_move(pos, &text).map_err(|_| EvaluationError::IllegalBestMove {
            best_move: text.clone(),
        })?;
        if pos.apply(mv).to_fen() == pos.to_fen() {
            return Err(EvaluationError::NullMove { best_move: text });
        }

        Ok(BotMove {
            best_move: mv,
            evaluation: result.evaluation,
        })
    }
}
