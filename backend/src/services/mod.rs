pub mod matches;
pub mod notifications;
pub mod scoring;

pub use matches::MatchService;
pub use notifications::NotificationService;
