use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::{is_valid_score, DEFAULT_REJECTION_REASON},
    db,
    error::MatchError,
    models::{normalize_pair, Conversation, Match, MatchAction, MatchStatus},
    services::notifications::NotificationService,
    utils::moderation,
};

/// Stateless entry point for every match lifecycle operation. Holds the pool
/// and the notifier explicitly; handlers and workers construct one per call.
#[derive(Debug, Clone)]
pub struct MatchService {
    pool: PgPool,
    notifier: NotificationService,
}

impl MatchService {
    pub fn new(pool: PgPool, notifier: NotificationService) -> Self {
        Self { pool, notifier }
    }

    /// Records a participant's action and resolves mutuality.
    ///
    /// The action lands through a conditional update keyed on
    /// `pending_approval`, and the mutuality/decline predicates run in the
    /// store as well, so a concurrent action or admin decision cannot be
    /// half-applied.
    pub async fn record_action(
        &self,
        match_id: Uuid,
        user_id: i32,
        action: MatchAction,
    ) -> Result<Match, MatchError> {
        let m = db::matches::get_match(&self.pool, match_id)
            .await?
            .ok_or(MatchError::NotFound)?;

        let slot = m.participant_slot(user_id).ok_or(MatchError::Forbidden)?;

        if !m.status.can_transition_to(MatchStatus::MutualLike) {
            return Err(MatchError::InvalidState {
                current: m.status,
                attempted: "record an action",
            });
        }

        let recorded =
            db::matches::set_participant_action(&self.pool, match_id, slot, action).await?;
        if recorded == 0 {
            // The status moved between the read and the write.
            return Err(self.stale_or_missing(match_id, "record an action").await);
        }

        let mut reached_mutual = false;
        if action.is_positive() {
            // Always attempt the promotion; the other participant's action may
            // have landed after our read.
            reached_mutual =
                db::matches::promote_to_mutual_like(&self.pool, match_id).await? > 0;
        } else {
            let declined = db::matches::mark_declined(&self.pool, match_id).await?;
            if declined == 0 {
                tracing::debug!("match {} settled before the decline landed", match_id);
            }
        }

        let updated = db::matches::get_match(&self.pool, match_id)
            .await?
            .ok_or(MatchError::NotFound)?;

        if reached_mutual {
            info!(
                "💞 Match {} is now mutual ({} <-> {})",
                updated.id, updated.user_id_1, updated.user_id_2
            );
            self.notifier.notify_mutual_match(&updated).await;
        }

        Ok(updated)
    }

    /// Admin review: approve a pending match.
    pub async fn approve(&self, match_id: Uuid, admin_id: i32) -> Result<Match, MatchError> {
        let m = db::matches::get_match(&self.pool, match_id)
            .await?
            .ok_or(MatchError::NotFound)?;

        if !m.status.can_transition_to(MatchStatus::Approved) {
            return Err(MatchError::InvalidState {
                current: m.status,
                attempted: "approve",
            });
        }

        let rows = db::matches::approve_match(&self.pool, match_id, admin_id).await?;
        if rows == 0 {
            return Err(self.stale_or_missing(match_id, "approve").await);
        }

        info!("✅ Match {} approved by admin {}", match_id, admin_id);

        db::matches::get_match(&self.pool, match_id)
            .await?
            .ok_or(MatchError::NotFound)
    }

    /// Admin review: reject a pending match, with an optional reason.
    pub async fn reject(
        &self,
        match_id: Uuid,
        admin_id: i32,
        reason: Option<&str>,
    ) -> Result<Match, MatchError> {
        let m = db::matches::get_match(&self.pool, match_id)
            .await?
            .ok_or(MatchError::NotFound)?;

        if !m.status.can_transition_to(MatchStatus::Rejected) {
            return Err(MatchError::InvalidState {
                current: m.status,
                attempted: "reject",
            });
        }

        let reason = resolve_rejection_reason(reason);
        let rows = db::matches::reject_match(&self.pool, match_id, admin_id, &reason).await?;
        if rows == 0 {
            return Err(self.stale_or_missing(match_id, "reject").await);
        }

        info!("🚫 Match {} rejected by admin {}: {}", match_id, admin_id, reason);

        db::matches::get_match(&self.pool, match_id)
            .await?
            .ok_or(MatchError::NotFound)
    }

    /// Moves a mutual match into chat, creating its conversation.
    pub async fn start_chat(
        &self,
        match_id: Uuid,
        user_id: i32,
    ) -> Result<(Match, Conversation), MatchError> {
        let m = db::matches::get_match(&self.pool, match_id)
            .await?
            .ok_or(MatchError::NotFound)?;

        if m.participant_slot(user_id).is_none() {
            return Err(MatchError::Forbidden);
        }

        if !m.status.can_transition_to(MatchStatus::ChatStarted) {
            return Err(MatchError::InvalidState {
                current: m.status,
                attempted: "start a chat",
            });
        }

        let conversation = match db::conversations::start_chat(&self.pool, match_id).await? {
            Some(conversation) => conversation,
            None => return Err(self.stale_or_missing(match_id, "start a chat").await),
        };

        let updated = db::matches::get_match(&self.pool, match_id)
            .await?
            .ok_or(MatchError::NotFound)?;

        info!("💬 Chat started for match {}", match_id);
        self.notifier.notify_chat_started(&updated).await;

        Ok((updated, conversation))
    }

    /// Creates a pending match for a candidate pair. Returns None when a row
    /// for the pair already exists.
    pub async fn create_match(
        &self,
        user_a: i32,
        user_b: i32,
        compatibility_score: i32,
    ) -> Result<Option<Match>, MatchError> {
        let (user_id_1, user_id_2) = normalize_pair(user_a, user_b).ok_or_else(|| {
            MatchError::Validation("a match requires two distinct users".to_string())
        })?;

        if !is_valid_score(compatibility_score) {
            return Err(MatchError::Validation(format!(
                "compatibility score {} is out of range",
                compatibility_score
            )));
        }

        let created =
            db::matches::create_match(&self.pool, user_id_1, user_id_2, compatibility_score)
                .await?;

        Ok(created)
    }

    pub async fn matches_for_user(&self, user_id: i32) -> Result<Vec<Match>, MatchError> {
        let matches = db::matches::get_matches_for_user(&self.pool, user_id).await?;
        Ok(matches)
    }

    /// A conditional update that hit zero rows means the row either vanished
    /// (it never existed) or its status moved under us; re-read to tell the
    /// caller which.
    async fn stale_or_missing(&self, match_id: Uuid, attempted: &'static str) -> MatchError {
        match db::matches::get_match(&self.pool, match_id).await {
            Ok(Some(m)) => MatchError::InvalidState {
                current: m.status,
                attempted,
            },
            Ok(None) => MatchError::NotFound,
            Err(e) => e.into(),
        }
    }
}

fn resolve_rejection_reason(reason: Option<&str>) -> String {
    reason
        .and_then(moderation::sanitize_reason)
        .unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reason_when_absent() {
        assert_eq!(resolve_rejection_reason(None), DEFAULT_REJECTION_REASON);
    }

    #[test]
    fn test_default_reason_when_blank() {
        assert_eq!(resolve_rejection_reason(Some("   ")), DEFAULT_REJECTION_REASON);
    }

    #[test]
    fn test_supplied_reason_kept() {
        assert_eq!(
            resolve_rejection_reason(Some("policy violation")),
            "policy violation"
        );
    }
}
