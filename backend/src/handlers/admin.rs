use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::MatchError,
    services::{MatchService, NotificationService},
    utils::Config,
};

// The admin role itself is enforced upstream by the auth gateway; requests
// reaching these handlers already carry a reviewed admin principal.

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub admin_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub admin_id: i32,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub success: bool,
}

pub async fn approve_match(
    State((pool, config)): State<(PgPool, Config)>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<ReviewResponse>, MatchError> {
    let service = MatchService::new(
        pool,
        NotificationService::new(config.notification_webhook_url.clone()),
    );
    service.approve(match_id, req.admin_id).await?;

    Ok(Json(ReviewResponse { success: true }))
}

pub async fn reject_match(
    State((pool, config)): State<(PgPool, Config)>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<ReviewResponse>, MatchError> {
    let service = MatchService::new(
        pool,
        NotificationService::new(config.notification_webhook_url.clone()),
    );
    service
        .reject(match_id, req.admin_id, req.reason.as_deref())
        .await?;

    Ok(Json(ReviewResponse { success: true }))
}
