use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::store::models::ContactMessage;

/// Relay for contact-form submissions, backed by a transactional-email
/// HTTP API. Plumbing only: one POST per message, no queueing, no retry.
#[derive(Clone)]
pub struct MailRelay {
    http: Client,
    api_url: String,
    api_key: String,
    recipient: String,
}

impl MailRelay {
    pub fn new(api_url: &str, api_key: &str, recipient: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(MailRelay {
            http,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            recipient: recipient.to_string(),
        })
    }

    /// Deliver one contact message to the configured recipient.
    pub async fn send(&self, msg: &ContactMessage) -> Result<()> {
        info!("Relaying contact message from {}", msg.email);

        let payload = serde_json::json!({
            "to": self.recipient,
            "reply_to": msg.email,
            "subject": format!("Cricdar contact from {}", msg.name),
            "text": msg.message,
        });

        let resp = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .context("Mail relay request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Mail relay error {}: {}", status, body);
        }

        Ok(())
    }
}
