//! Webhook notification delivery.
//!
//! Posts each review event as JSON to a single configured endpoint.
//! Downstream automation (client portals, schedulers consuming the
//! scheduling hint) hangs off this channel.

use crate::bus::ReviewEvent;

/// Environment variable naming the webhook endpoint.
const WEBHOOK_URL_VAR: &str = "REVIEW_WEBHOOK_URL";

/// Request timeout for webhook posts.
const WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Sends review events to an external webhook endpoint.
pub struct WebhookDelivery {
    client: reqwest::Client,
    url: String,
}

impl WebhookDelivery {
    /// Create a delivery channel for the given endpoint URL.
    pub fn new(url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { client, url }
    }

    /// Load the endpoint from the environment.
    ///
    /// Returns `None` if `REVIEW_WEBHOOK_URL` is not set, signalling that
    /// webhook delivery is not configured.
    pub fn from_env() -> Option<Self> {
        std::env::var(WEBHOOK_URL_VAR).ok().map(Self::new)
    }

    /// POST one event as JSON. Non-2xx responses are errors.
    pub async fn deliver(&self, event: &ReviewEvent) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.url)
            .json(event)
            .send()
            .await?
            .error_for_status()?;

        tracing::info!(
            url = %self.url,
            event_type = %event.event_type,
            submission_id = event.submission_id,
            "Webhook delivered"
        );
        Ok(())
    }
}
