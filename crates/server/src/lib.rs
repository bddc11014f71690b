//! HTTP front-end for the hybrid engine.
//!
//! `POST /api/evaluate/` returns the full evaluation, `POST /api/bot-move/`
//! just the move to play. Both take `{fen, depth, openai_api_key}`.

pub mod error;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use chess_core::{Position, legal_moves};
use hybrid_engine::{
    BotMove, CompletionClient, EvaluationError, EvaluationResult, HybridConfig, HybridEngine,
    JudgeConfig, JudgeError, JudgmentService, validate_depth,
};
use serde::Deserialize;
use tracing::{error, info};

pub use error::ApiError;

/// Builds the judgment service for one request's credential.
pub trait JudgeFactory: Send + Sync {
    fn build(
        &self,
        config: &JudgeConfig,
        api_key: &str,
    ) -> Result<Box<dyn JudgmentService>, JudgeError>;
}

/// Production factory: a blocking completion client per request.
pub struct CompletionJudges;

impl JudgeFactory for CompletionJudges {
    fn build(
        &self,
        config: &JudgeConfig,
        api_key: &str,
    ) -> Result<Box<dyn JudgmentService>, JudgeError> {
        Ok(Box::new(CompletionClient::new(config, api_key)?))
    }
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<HybridConfig>,
    judges: Arc<dyn JudgeFactory>,
}

impl AppState {
    pub fn new(config: HybridConfig, judges: Arc<dyn JudgeFactory>) -> Self {
        Self {
            config: Arc::new(config),
            judges,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub fen: String,
    pub depth: i64,
    pub openai_api_key: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/evaluate/", post(evaluate))
        .route("/api/bot-move/", post(bot_move))
        .with_state(state)
}

async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<EvaluationResult>, ApiError> {
    let result = run(state, req, |engine, pos, depth| engine.evaluate_position(pos, depth)).await?;
    info!(best_move = %result.best_move, evaluation = result.evaluation, "evaluate served");
    Ok(Json(result))
}

async fn bot_move(
    State(state): State<AppState>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<BotMove>, ApiError> {
    let mv = run(state, req, |engine, pos, depth| engine.bot_move_position(pos, depth)).await?;
    info!(best_move = %mv.best_move, evaluation = mv.evaluation, "bot move served");
    Ok(Json(mv))
}

/// Validates the request, then runs `op` on a blocking thread with an
/// engine built for this request alone. Nothing is built for a request
/// that fails validation.
async fn run<T, F>(state: AppState, req: PositionRequest, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&HybridEngine, &Position, u8) -> Result<T, EvaluationError> + Send + 'static,
{
    if req.openai_api_key.trim().is_empty() {
        return Err(ApiError::MissingCredential);
    }
    let depth = validate_depth(req.depth)?;
    let pos = Position::from_fen(&req.fen).map_err(EvaluationError::from)?;
    if legal_moves(&pos).is_empty() {
        return Err(EvaluationError::NoLegalMoves.into());
    }
    info!(fen = %req.fen, depth, "request accepted");

    let task = tokio::task::spawn_blocking(move || {
        let config = HybridConfig::clone(&state.config);
        let engine = match state.judges.build(&config.judge, &req.openai_api_key) {
            Ok(judge) => HybridEngine::with_judge(config, judge),
            Err(e) => {
                error!(error = %e, "could not build judgment client, using heuristic leaves");
                HybridEngine::heuristic(config)
            }
        };
        op(&engine, &pos, depth)
    });

    let outcome = task.await.map_err(|e| ApiError::Worker(e.to_string()))?;
    Ok(outcome?)
}
