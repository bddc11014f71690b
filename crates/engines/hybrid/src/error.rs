//! Error types for judgment, search, evaluation requests and configuration.

use std::path::PathBuf;

use chess_core::FenError;
use thiserror::Error;

/// A judgment request that produced no usable text.
///
/// These never escape the leaf evaluator; they only decide when to fall
/// back to the heuristic.
#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("judgment request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("judgment service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("judgment reply has no choices")]
    MissingChoices,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search budget exhausted after {nodes} nodes")]
    Aborted { nodes: u64 },
}

/// Why an evaluation request produced no result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Invalid FEN: {0}")]
    InvalidPosition(#[from] FenError),

    #[error("Depth must be between 1 and 3, got {depth}")]
    DepthOutOfRange { depth: i64 },

    #[error("Game is already over: no legal moves")]
    NoLegalMoves,

    #[error("No valid moves found")]
    NoValidMoves,

    #[error("Invalid move generated: {best_move}")]
    IllegalBestMove { best_move: String },

    #[error("Move did not change the position: {best_move}")]
    NullMove { best_move: String },

    #[error("Search aborted after {nodes} nodes")]
    SearchAborted { nodes: u64 },
}

impl EvaluationError {
    /// True when the request itself was at fault (HTTP 400); everything
    /// else is an engine failure (HTTP 500).
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            EvaluationError::InvalidPosition(_)
                | EvaluationError::DepthOutOfRange { .. }
                | EvaluationError::NoLegalMoves
        )
    }
}

impl From<SearchError> for EvaluationError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Aborted { nodes } => EvaluationError::SearchAborted { nodes },
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
