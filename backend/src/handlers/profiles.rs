use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::{
    constants::{DISPLAY_NAME_CHAR_LIMIT, INTEREST_CHAR_LIMIT, MAX_PROFILE_INTERESTS},
    db,
    error::MatchError,
    models::Profile,
    utils::{moderation, Config},
};

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub display_name: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

pub async fn create_profile(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<Json<Profile>, MatchError> {
    let display_name = moderation::clean_text(&req.display_name, DISPLAY_NAME_CHAR_LIMIT)
        .ok_or_else(|| MatchError::Validation("display_name must not be empty".to_string()))?;

    if req.interests.len() > MAX_PROFILE_INTERESTS {
        return Err(MatchError::Validation(format!(
            "at most {} interests are allowed",
            MAX_PROFILE_INTERESTS
        )));
    }

    let interests: Vec<String> = req
        .interests
        .iter()
        .filter_map(|interest| moderation::clean_text(interest, INTEREST_CHAR_LIMIT))
        .collect();

    let profile = db::profiles::create_profile(&pool, &display_name, &interests).await?;

    Ok(Json(profile))
}

pub async fn get_profile(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(profile_id): Path<i32>,
) -> Result<Json<Profile>, MatchError> {
    let profile = db::profiles::get_profile(&pool, profile_id)
        .await?
        .ok_or(MatchError::NotFound)?;

    Ok(Json(profile))
}
