pub mod admin;
pub mod matches;
pub mod profiles;

pub use admin::{approve_match, reject_match};
pub use matches::{list_matches, record_action, start_chat};
pub use profiles::{create_profile, get_profile};
