//! Transition history models.
//!
//! Rows in `review_transitions` are append-only: a committed transition is
//! never updated or deleted, and feedback attached to one is immutable.

use serde::Serialize;
use sqlx::FromRow;
use vireo_core::error::CoreError;
use vireo_core::feedback::Feedback;
use vireo_core::roles::ReviewerRole;
use vireo_core::submission::{ReviewAction, TransitionRecord};
use vireo_core::types::{DbId, Timestamp};

use super::status::{StatusId, SubmissionStatus};

/// A row from the `review_transitions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransitionRow {
    pub id: DbId,
    pub submission_id: DbId,
    pub from_state_id: StatusId,
    pub to_state_id: StatusId,
    pub action: String,
    pub actor_id: DbId,
    pub actor_role: String,
    pub feedback: Option<serde_json::Value>,
    /// Submission version after this transition (1-based).
    pub seq: i32,
    pub created_at: Timestamp,
}

impl TransitionRow {
    /// Rebuild the domain record from the stored row.
    pub fn to_domain(&self) -> Result<TransitionRecord, CoreError> {
        let feedback = self
            .feedback
            .as_ref()
            .map(|value| {
                serde_json::from_value::<Feedback>(value.clone()).map_err(|e| {
                    CoreError::Internal(format!(
                        "Malformed feedback on transition {}: {e}",
                        self.id
                    ))
                })
            })
            .transpose()?;

        Ok(TransitionRecord {
            from_state: SubmissionStatus::state_from_id(self.from_state_id)?,
            to_state: SubmissionStatus::state_from_id(self.to_state_id)?,
            action: ReviewAction::parse(&self.action)?,
            actor_id: self.actor_id,
            actor_role: ReviewerRole::parse(&self.actor_role)?,
            timestamp: self.created_at,
            feedback,
        })
    }
}
