use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Lifecycle state of a match.
///
/// Two independent paths lead out of `PendingApproval`: the admin review
/// path (`Approved` / `Rejected`) and the participant path
/// (`MutualLike` -> `ChatStarted`, or `Declined` on a pass). No path ever
/// returns to `PendingApproval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    PendingApproval,
    Approved,
    Rejected,
    MutualLike,
    ChatStarted,
    Declined,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::PendingApproval => "pending_approval",
            MatchStatus::Approved => "approved",
            MatchStatus::Rejected => "rejected",
            MatchStatus::MutualLike => "mutual_like",
            MatchStatus::ChatStarted => "chat_started",
            MatchStatus::Declined => "declined",
        }
    }

    /// Single source of truth for transition legality. Every service entry
    /// point and every conditional UPDATE in the db layer agrees with this
    /// table.
    pub fn can_transition_to(self, next: MatchStatus) -> bool {
        use MatchStatus::*;
        matches!(
            (self, next),
            (PendingApproval, Approved)
                | (PendingApproval, Rejected)
                | (PendingApproval, MutualLike)
                | (PendingApproval, Declined)
                | (MutualLike, ChatStarted)
        )
    }

    pub fn is_terminal(self) -> bool {
        use MatchStatus::*;
        matches!(self, Approved | Rejected | ChatStarted | Declined)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action a participant records against a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchAction {
    Like,
    Pass,
    SuperLike,
}

impl MatchAction {
    pub fn parse(value: &str) -> Option<MatchAction> {
        match value {
            "like" => Some(MatchAction::Like),
            "pass" => Some(MatchAction::Pass),
            "super_like" => Some(MatchAction::SuperLike),
            _ => None,
        }
    }

    /// A positive action counts toward mutuality; a pass ends the match.
    pub fn is_positive(self) -> bool {
        matches!(self, MatchAction::Like | MatchAction::SuperLike)
    }
}

/// Which of a match's two participant slots a user occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantSlot {
    First,
    Second,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: Uuid,
    pub user_id_1: i32,
    pub user_id_2: i32,
    pub compatibility_score: i32,
    pub status: MatchStatus,
    pub user_1_action: Option<MatchAction>,
    pub user_2_action: Option<MatchAction>,
    pub reviewed_by: Option<i32>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn participant_slot(&self, user_id: i32) -> Option<ParticipantSlot> {
        if user_id == self.user_id_1 {
            Some(ParticipantSlot::First)
        } else if user_id == self.user_id_2 {
            Some(ParticipantSlot::Second)
        } else {
            None
        }
    }
}

/// Orders a participant pair as it is stored (smaller id first). Returns
/// None for a self-pair.
pub fn normalize_pair(a: i32, b: i32) -> Option<(i32, i32)> {
    match a.cmp(&b) {
        Ordering::Less => Some((a, b)),
        Ordering::Greater => Some((b, a)),
        Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_match(status: MatchStatus) -> Match {
        Match {
            id: Uuid::new_v4(),
            user_id_1: 1,
            user_id_2: 2,
            compatibility_score: 75,
            status,
            user_1_action: None,
            user_2_action: None,
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_legal_transitions() {
        use MatchStatus::*;
        assert!(PendingApproval.can_transition_to(Approved));
        assert!(PendingApproval.can_transition_to(Rejected));
        assert!(PendingApproval.can_transition_to(MutualLike));
        assert!(PendingApproval.can_transition_to(Declined));
        assert!(MutualLike.can_transition_to(ChatStarted));
    }

    #[test]
    fn test_illegal_transitions() {
        use MatchStatus::*;
        // Nothing returns to pending
        for status in [Approved, Rejected, MutualLike, ChatStarted, Declined] {
            assert!(!status.can_transition_to(PendingApproval));
        }
        // Terminal states go nowhere
        for status in [Approved, Rejected, ChatStarted, Declined] {
            for next in [Approved, Rejected, MutualLike, ChatStarted, Declined] {
                assert!(!status.can_transition_to(next));
            }
        }
        // The admin and participant paths do not cross
        assert!(!MutualLike.can_transition_to(Approved));
        assert!(!MutualLike.can_transition_to(Rejected));
        assert!(!PendingApproval.can_transition_to(ChatStarted));
        assert!(!PendingApproval.can_transition_to(PendingApproval));
    }

    #[test]
    fn test_terminal_states() {
        use MatchStatus::*;
        assert!(!PendingApproval.is_terminal());
        assert!(!MutualLike.is_terminal());
        assert!(Approved.is_terminal());
        assert!(Rejected.is_terminal());
        assert!(ChatStarted.is_terminal());
        assert!(Declined.is_terminal());
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!(MatchAction::parse("like"), Some(MatchAction::Like));
        assert_eq!(MatchAction::parse("pass"), Some(MatchAction::Pass));
        assert_eq!(MatchAction::parse("super_like"), Some(MatchAction::SuperLike));
        assert_eq!(MatchAction::parse("poke"), None);
        assert_eq!(MatchAction::parse(""), None);
        assert_eq!(MatchAction::parse("Like"), None);
    }

    #[test]
    fn test_positive_actions() {
        assert!(MatchAction::Like.is_positive());
        assert!(MatchAction::SuperLike.is_positive());
        assert!(!MatchAction::Pass.is_positive());
    }

    #[test]
    fn test_participant_slot() {
        let m = test_match(MatchStatus::PendingApproval);
        assert_eq!(m.participant_slot(1), Some(ParticipantSlot::First));
        assert_eq!(m.participant_slot(2), Some(ParticipantSlot::Second));
        assert_eq!(m.participant_slot(3), None);
    }

    #[test]
    fn test_normalize_pair() {
        assert_eq!(normalize_pair(3, 7), Some((3, 7)));
        assert_eq!(normalize_pair(7, 3), Some((3, 7)));
        assert_eq!(normalize_pair(5, 5), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(MatchStatus::PendingApproval.to_string(), "pending_approval");
        assert_eq!(MatchStatus::MutualLike.to_string(), "mutual_like");
    }
}
