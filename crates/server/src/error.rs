use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hybrid_engine::EvaluationError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Everything a handler can fail with, rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("openai_api_key must not be blank")]
    MissingCredential,

    #[error("evaluation worker failed: {0}")]
    Worker(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Evaluation(e) if e.is_client_fault() => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential => StatusCode::BAD_REQUEST,
            ApiError::Evaluation(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        } else {
            warn!(%status, error = %message, "request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
