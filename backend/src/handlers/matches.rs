use axum::{
    extract::{Path, State},
    response::Json,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use uuid::Uuid;

use crate::{
    constants::{ACTION_RATE_LIMIT_PER_MINUTE, RATE_LIMIT_WINDOW_SECONDS},
    error::MatchError,
    models::{Conversation, Match, MatchAction},
    services::{MatchService, NotificationService},
    utils::Config,
};

// Rate limiting structure for participant actions
#[derive(Debug)]
struct ActionRateLimiter {
    requests: HashMap<i32, Vec<Instant>>,
    max_requests_per_minute: u32,
}

impl ActionRateLimiter {
    fn new(max_requests_per_minute: u32) -> Self {
        Self {
            requests: HashMap::new(),
            max_requests_per_minute,
        }
    }

    async fn can_make_request(&mut self, user_id: i32) -> bool {
        let now = Instant::now();
        let window_start = now - Duration::from_secs(RATE_LIMIT_WINDOW_SECONDS);

        let requests = self.requests.entry(user_id).or_insert_with(Vec::new);

        // Remove old requests
        requests.retain(|&time| time > window_start);

        if requests.len() < self.max_requests_per_minute as usize {
            requests.push(now);
            true
        } else {
            false
        }
    }
}

static ACTION_RATE_LIMITER: Lazy<Arc<Mutex<ActionRateLimiter>>> =
    Lazy::new(|| Arc::new(Mutex::new(ActionRateLimiter::new(ACTION_RATE_LIMIT_PER_MINUTE))));

fn match_service(pool: PgPool, config: &Config) -> MatchService {
    MatchService::new(
        pool,
        NotificationService::new(config.notification_webhook_url.clone()),
    )
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub user_id: i32,
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct MatchEnvelope {
    pub success: bool,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_record: Option<Match>,
}

/// Records a like/pass/super-like for the calling participant and reports
/// the resulting match state.
pub async fn record_action(
    State((pool, config)): State<(PgPool, Config)>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<MatchEnvelope>, MatchError> {
    {
        let mut limiter = ACTION_RATE_LIMITER.lock().await;
        if !limiter.can_make_request(req.user_id).await {
            return Err(MatchError::RateLimited);
        }
    }

    let action = MatchAction::parse(&req.action)
        .ok_or_else(|| MatchError::Validation(format!("unknown action '{}'", req.action)))?;

    let service = match_service(pool, &config);
    let updated = service.record_action(match_id, req.user_id, action).await?;

    Ok(Json(MatchEnvelope {
        success: true,
        match_record: Some(updated),
    }))
}

#[derive(Debug, Deserialize)]
pub struct StartChatRequest {
    pub user_id: i32,
}

#[derive(Debug, Serialize)]
pub struct StartChatResponse {
    pub success: bool,
    pub conversation: Conversation,
}

pub async fn start_chat(
    State((pool, config)): State<(PgPool, Config)>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<StartChatRequest>,
) -> Result<Json<StartChatResponse>, MatchError> {
    let service = match_service(pool, &config);
    let (_updated, conversation) = service.start_chat(match_id, req.user_id).await?;

    Ok(Json(StartChatResponse {
        success: true,
        conversation,
    }))
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<Match>,
}

pub async fn list_matches(
    State((pool, config)): State<(PgPool, Config)>,
    Path(user_id): Path<i32>,
) -> Result<Json<MatchListResponse>, MatchError> {
    let service = match_service(pool, &config);
    let matches = service.matches_for_user(user_id).await?;

    Ok(Json(MatchListResponse { matches }))
}
