use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::MatchStatus;

/// Failures surfaced by the match lifecycle. Nothing here is retried
/// internally; callers get a structured JSON failure and decide what to do.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("not found")]
    NotFound,

    #[error("caller is not a participant in this match")]
    Forbidden,

    #[error("match is {current}; cannot {attempted}")]
    InvalidState {
        current: MatchStatus,
        attempted: &'static str,
    },

    #[error("{0}")]
    Validation(String),

    #[error("rate limit exceeded, please try again later")]
    RateLimited,

    #[error("internal error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for MatchError {
    fn into_response(self) -> Response {
        let status = match &self {
            MatchError::NotFound => StatusCode::NOT_FOUND,
            MatchError::Forbidden => StatusCode::FORBIDDEN,
            MatchError::InvalidState { .. } => StatusCode::CONFLICT,
            MatchError::Validation(_) => StatusCode::BAD_REQUEST,
            MatchError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            MatchError::Database(e) => {
                tracing::error!("database error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
