//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`ReviewEvent`]s. It is
//! shared via `Arc<EventBus>` across the application; the review engine is
//! the only publisher, and each event is published once per committed
//! transition.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;
use vireo_core::roles::ReviewerRole;
use vireo_core::submission::{ReviewAction, SubmissionState, TransitionRecord, VideoSubmission};
use vireo_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// ReviewEvent
// ---------------------------------------------------------------------------

/// A committed review transition, as seen by notification and audit
/// consumers.
///
/// Carries the fields the dispatcher routes on plus the advisory data
/// (due date, scheduling hint) that collaborators interpret. The feedback
/// body itself stays in the transition history; the event only says whether
/// one was attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEvent {
    /// Idempotency key for at-least-once consumers.
    pub event_id: Uuid,
    /// Dot-separated event name derived from the action, e.g.
    /// `"review.send_to_client"`.
    pub event_type: String,
    pub submission_id: DbId,
    pub campaign_id: DbId,
    pub creator_id: DbId,
    pub actor_id: DbId,
    pub actor_role: ReviewerRole,
    pub action: ReviewAction,
    pub from_state: SubmissionState,
    pub to_state: SubmissionState,
    pub has_feedback: bool,
    /// Advisory resubmission deadline copied from the feedback, when set.
    pub due_date: Option<Timestamp>,
    /// Opaque scheduling metadata from bulk requests, passed through
    /// verbatim.
    pub scheduling_hint: Option<serde_json::Value>,
    pub timestamp: Timestamp,
}

impl ReviewEvent {
    /// Build the event for a transition committed against `submission`.
    ///
    /// `submission` is the pre-transition read; identity fields come from
    /// it, transition fields from `record`.
    pub fn for_transition(submission: &VideoSubmission, record: &TransitionRecord) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            event_type: format!("review.{}", record.action),
            submission_id: submission.id,
            campaign_id: submission.campaign_id,
            creator_id: submission.creator_id,
            actor_id: record.actor_id,
            actor_role: record.actor_role,
            action: record.action,
            from_state: record.from_state,
            to_state: record.to_state,
            has_feedback: record.feedback.is_some(),
            due_date: record.feedback.as_ref().and_then(|f| f.due_date),
            scheduling_hint: None,
            timestamp: record.timestamp,
        }
    }

    /// Attach opaque scheduling metadata (bulk requests only).
    pub fn with_scheduling_hint(mut self, hint: serde_json::Value) -> Self {
        self.scheduling_hint = Some(hint);
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers
/// (persistence, notification dispatch) independently receive every
/// published [`ReviewEvent`].
pub struct EventBus {
    sender: broadcast::Sender<ReviewEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is dropped; the send error only
    /// signals an empty receiver set.
    pub fn publish(&self, event: ReviewEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ReviewEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
