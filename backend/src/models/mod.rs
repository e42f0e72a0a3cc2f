pub mod conversations;
pub mod matches;
pub mod profiles;

pub use conversations::Conversation;
pub use matches::{normalize_pair, Match, MatchAction, MatchStatus, ParticipantSlot};
pub use profiles::Profile;
