use crate::models::{Match, MatchAction, MatchStatus, ParticipantSlot};
use sqlx::PgPool;
use uuid::Uuid;

const MATCH_COLUMNS: &str = "id, user_id_1, user_id_2, compatibility_score, status, \
     user_1_action, user_2_action, reviewed_by, reviewed_at, rejection_reason, \
     created_at, updated_at";

// Match operations
//
// Every status-changing statement is a single conditional UPDATE keyed by the
// current status, so concurrent requests against the same row resolve in the
// store instead of racing through read-modify-write.

/// Inserts a match for an already-normalized pair (user_id_1 < user_id_2).
/// Returns None when a row for the pair already exists.
pub async fn create_match(
    pool: &PgPool,
    user_id_1: i32,
    user_id_2: i32,
    compatibility_score: i32,
) -> Result<Option<Match>, sqlx::Error> {
    let created = sqlx::query_as::<_, Match>(&format!(
        "INSERT INTO matches (user_id_1, user_id_2, compatibility_score) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (user_id_1, user_id_2) DO NOTHING \
         RETURNING {MATCH_COLUMNS}"
    ))
    .bind(user_id_1)
    .bind(user_id_2)
    .bind(compatibility_score)
    .fetch_optional(pool)
    .await?;

    Ok(created)
}

pub async fn get_match(pool: &PgPool, match_id: Uuid) -> Result<Option<Match>, sqlx::Error> {
    let found = sqlx::query_as::<_, Match>(&format!(
        "SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"
    ))
    .bind(match_id)
    .fetch_optional(pool)
    .await?;

    Ok(found)
}

pub async fn get_matches_for_user(
    pool: &PgPool,
    user_id: i32,
) -> Result<Vec<Match>, sqlx::Error> {
    let matches = sqlx::query_as::<_, Match>(&format!(
        "SELECT {MATCH_COLUMNS} FROM matches \
         WHERE user_id_1 = $1 OR user_id_2 = $1 \
         ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(matches)
}

/// Records a participant's action while the match is still under
/// consideration. Returns the number of rows updated (0 when the match has
/// already left `pending_approval`).
pub async fn set_participant_action(
    pool: &PgPool,
    match_id: Uuid,
    slot: ParticipantSlot,
    action: MatchAction,
) -> Result<u64, sqlx::Error> {
    let query = match slot {
        ParticipantSlot::First => {
            "UPDATE matches SET user_1_action = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending_approval'"
        }
        ParticipantSlot::Second => {
            "UPDATE matches SET user_2_action = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending_approval'"
        }
    };

    let result = sqlx::query(query)
        .bind(match_id)
        .bind(action)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Promotes a pending match to `mutual_like` once both participants hold a
/// positive action. The predicate lives in the statement so two concurrent
/// likes cannot both miss it.
pub async fn promote_to_mutual_like(pool: &PgPool, match_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE matches SET status = 'mutual_like', updated_at = NOW() \
         WHERE id = $1 AND status = 'pending_approval' \
         AND user_1_action IN ('like', 'super_like') \
         AND user_2_action IN ('like', 'super_like')",
    )
    .bind(match_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Settles a pending match as declined after a participant passed.
pub async fn mark_declined(pool: &PgPool, match_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE matches SET status = 'declined', updated_at = NOW() \
         WHERE id = $1 AND status = 'pending_approval'",
    )
    .bind(match_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

// Admin review operations

pub async fn approve_match(
    pool: &PgPool,
    match_id: Uuid,
    admin_id: i32,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE matches \
         SET status = 'approved', reviewed_by = $2, reviewed_at = NOW(), \
             rejection_reason = NULL, updated_at = NOW() \
         WHERE id = $1 AND status = 'pending_approval'",
    )
    .bind(match_id)
    .bind(admin_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn reject_match(
    pool: &PgPool,
    match_id: Uuid,
    admin_id: i32,
    reason: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE matches \
         SET status = 'rejected', reviewed_by = $2, reviewed_at = NOW(), \
             rejection_reason = $3, updated_at = NOW() \
         WHERE id = $1 AND status = 'pending_approval'",
    )
    .bind(match_id)
    .bind(admin_id)
    .bind(reason)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

// Matchmaker support

/// All participant pairs that already have a match row, in stored order
/// (user_id_1 < user_id_2). Rows are never deleted, so one row per pair ever.
pub async fn get_existing_pairs(pool: &PgPool) -> Result<Vec<(i32, i32)>, sqlx::Error> {
    let pairs = sqlx::query_as::<_, (i32, i32)>("SELECT user_id_1, user_id_2 FROM matches")
        .fetch_all(pool)
        .await?;

    Ok(pairs)
}

pub async fn count_with_status(
    pool: &PgPool,
    status: MatchStatus,
) -> Result<i64, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM matches WHERE status = $1")
        .bind(status)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
