//! Environment-configured recipient directory.
//!
//! Resolves notification audiences to email addresses from environment
//! variables. User and contact records live in the platform's account
//! service; this directory covers deployments that route review
//! notifications to shared inboxes.
//
// TODO: resolve creator and client addresses through the accounts service
// once its lookup API is exposed; the env-configured lists are a stand-in.

use async_trait::async_trait;
use vireo_events::{Audience, RecipientDirectory, ReviewEvent};

/// Recipient directory backed by environment variables.
///
/// | Env Var                 | Audience          |
/// |-------------------------|-------------------|
/// | `NOTIFY_CREATOR_EMAILS` | `Creator`         |
/// | `NOTIFY_ADMIN_EMAILS`   | `Admins`          |
/// | `NOTIFY_CLIENT_EMAILS`  | `ClientReviewers` |
///
/// Each variable is a comma-separated address list; unset means no
/// recipients for that audience.
pub struct EnvRecipientDirectory {
    creator: Vec<String>,
    admins: Vec<String>,
    clients: Vec<String>,
}

impl EnvRecipientDirectory {
    /// Load the address lists from the environment.
    pub fn from_env() -> Self {
        Self {
            creator: parse_list(std::env::var("NOTIFY_CREATOR_EMAILS").ok()),
            admins: parse_list(std::env::var("NOTIFY_ADMIN_EMAILS").ok()),
            clients: parse_list(std::env::var("NOTIFY_CLIENT_EMAILS").ok()),
        }
    }
}

fn parse_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl RecipientDirectory for EnvRecipientDirectory {
    async fn emails_for(&self, _event: &ReviewEvent, audience: Audience) -> Vec<String> {
        match audience {
            Audience::Creator => self.creator.clone(),
            Audience::Admins => self.admins.clone(),
            Audience::ClientReviewers => self.clients.clone(),
        }
    }
}
