pub mod models;
pub mod db;
pub mod services;
pub mod handlers;
pub mod utils;
pub mod constants;
pub mod error;

pub use utils::config::Config;
pub use db::connection::get_db_pool;
pub use error::MatchError;

// Re-export common types
pub use sqlx::{PgPool, Row};
pub use anyhow::Result;
pub use uuid::Uuid;
pub use chrono::{DateTime, Utc};
