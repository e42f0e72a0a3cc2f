use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::models::Match;

/// Delivers lifecycle events to the platform's notification webhook.
/// Delivery is best effort: failures are logged and never fail the
/// transition that triggered them.
#[derive(Debug, Clone)]
pub struct NotificationService {
    client: Client,
    webhook_url: Option<String>,
}

impl NotificationService {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    pub async fn notify_mutual_match(&self, m: &Match) {
        self.post_event("mutual_like", m).await;
    }

    pub async fn notify_chat_started(&self, m: &Match) {
        self.post_event("chat_started", m).await;
    }

    async fn post_event(&self, event: &str, m: &Match) {
        let url = match &self.webhook_url {
            Some(url) => url,
            None => {
                debug!("notification webhook not configured, skipping {} event", event);
                return;
            }
        };

        let payload = json!({
            "event": event,
            "match_id": m.id,
            "user_ids": [m.user_id_1, m.user_id_2],
        });

        match self.client.post(url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => {
                warn!(
                    "notification webhook returned {} for {} event on match {}",
                    resp.status(),
                    event,
                    m.id
                );
            }
            Err(e) => {
                warn!("failed to deliver {} notification for match {}: {}", event, m.id, e);
            }
        }
    }
}
