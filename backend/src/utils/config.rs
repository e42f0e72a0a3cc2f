use anyhow::Result;
use std::env;
use crate::constants::{DEFAULT_MATCHMAKER_INTERVAL_SECS, DEFAULT_SERVER_PORT};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub notification_webhook_url: Option<String>,
    pub matchmaker_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SERVER_PORT),
            notification_webhook_url: env::var("NOTIFICATION_WEBHOOK_URL").ok(),
            matchmaker_interval_secs: env::var("MATCHMAKER_INTERVAL_SECS")
                .unwrap_or_else(|_| DEFAULT_MATCHMAKER_INTERVAL_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_MATCHMAKER_INTERVAL_SECS),
        })
    }
}
