//! Event-to-notification routing.
//!
//! [`NotificationDispatcher`] subscribes to the event bus and decides, per
//! committed transition, which audiences hear about it, then hands off to
//! the configured delivery channels. Delivery is fire-and-forget: a failed
//! send is logged and never retried here, and it cannot affect the already
//! committed transition.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use vireo_core::submission::{ReviewAction, SubmissionState};

use crate::bus::ReviewEvent;
use crate::delivery::email::EmailDelivery;
use crate::delivery::webhook::WebhookDelivery;

// ---------------------------------------------------------------------------
// Audience routing
// ---------------------------------------------------------------------------

/// Who should hear about a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// The submitting creator.
    Creator,
    /// The reviewing organization's admins.
    Admins,
    /// The client-side approvers for the campaign.
    ClientReviewers,
}

/// Decide the audiences for a committed transition.
///
/// Outcome-bearing transitions go to the creator; hand-offs go to whoever
/// the submission now waits on.
pub fn audiences_for(event: &ReviewEvent) -> Vec<Audience> {
    match (event.action, event.to_state) {
        // The submission now waits on the client side.
        (ReviewAction::SendToClient, _) => vec![Audience::ClientReviewers],
        // A resubmission puts it back in the admin queue.
        (ReviewAction::Resubmit, _) => vec![Audience::Admins],
        // A client decision is the admins' signal to act.
        (ReviewAction::Approve, _) => vec![Audience::Admins],
        // Outcomes land with the creator.
        (_, SubmissionState::Approved)
        | (_, SubmissionState::Rejected)
        | (_, SubmissionState::NeedsRevision) => vec![Audience::Creator],
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Recipient resolution
// ---------------------------------------------------------------------------

/// Resolves an audience to concrete email addresses.
///
/// User and contact records live outside this core; the platform wires an
/// implementation backed by its account service.
#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    async fn emails_for(&self, event: &ReviewEvent, audience: Audience) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// NotificationDispatcher
// ---------------------------------------------------------------------------

/// Routes review events to notification channels.
pub struct NotificationDispatcher {
    directory: Arc<dyn RecipientDirectory>,
    email: Option<EmailDelivery>,
    webhook: Option<WebhookDelivery>,
}

impl NotificationDispatcher {
    /// Create a dispatcher. Channels are optional: an unconfigured channel
    /// is skipped, not an error.
    pub fn new(
        directory: Arc<dyn RecipientDirectory>,
        email: Option<EmailDelivery>,
        webhook: Option<WebhookDelivery>,
    ) -> Self {
        Self {
            directory,
            email,
            webhook,
        }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<ReviewEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.dispatch(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event to all audiences and channels.
    async fn dispatch(&self, event: &ReviewEvent) {
        if let Some(webhook) = &self.webhook {
            if let Err(e) = webhook.deliver(event).await {
                tracing::error!(
                    error = %e,
                    event_type = %event.event_type,
                    submission_id = event.submission_id,
                    "Webhook delivery failed"
                );
            }
        }

        let Some(email) = &self.email else {
            return;
        };

        for audience in audiences_for(event) {
            for address in self.directory.emails_for(event, audience).await {
                if let Err(e) = email.deliver(&address, event).await {
                    tracing::error!(
                        error = %e,
                        event_type = %event.event_type,
                        submission_id = event.submission_id,
                        "Email delivery failed"
                    );
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
