pub mod config;
pub mod logging;
pub mod moderation;

pub use config::Config;
pub use logging::init_logging;
