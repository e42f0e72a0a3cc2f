use crate::models::Conversation;
use sqlx::PgPool;
use uuid::Uuid;

/// Moves a mutual match to `chat_started` and creates its conversation in
/// one transaction, so the status never advances without a conversation row.
/// Returns None when the match is not currently in `mutual_like`.
pub async fn start_chat(
    pool: &PgPool,
    match_id: Uuid,
) -> Result<Option<Conversation>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE matches SET status = 'chat_started', updated_at = NOW() \
         WHERE id = $1 AND status = 'mutual_like'",
    )
    .bind(match_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if rows == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let conversation = sqlx::query_as::<_, Conversation>(
        "INSERT INTO conversations (match_id) \
         VALUES ($1) \
         RETURNING id, match_id, created_at",
    )
    .bind(match_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(conversation))
}
