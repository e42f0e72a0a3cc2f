use crate::models::Profile;
use sqlx::PgPool;

const PROFILE_COLUMNS: &str = "id, display_name, interests, active, created_at, updated_at";

pub async fn create_profile(
    pool: &PgPool,
    display_name: &str,
    interests: &[String],
) -> Result<Profile, sqlx::Error> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "INSERT INTO profiles (display_name, interests) \
         VALUES ($1, $2) \
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(display_name)
    .bind(interests)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profile(pool: &PgPool, profile_id: i32) -> Result<Option<Profile>, sqlx::Error> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
    ))
    .bind(profile_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn get_active_profiles(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
    let profiles = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE active = TRUE ORDER BY id ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}
