pub mod connection;
pub mod conversations;
pub mod matches;
pub mod migrations;
pub mod profiles;

pub use connection::{get_db_pool, DatabaseConfig};
