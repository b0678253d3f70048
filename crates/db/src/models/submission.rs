//! Video submission entity and request DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vireo_core::error::CoreError;
use vireo_core::feedback::Annotation;
use vireo_core::submission::{ContentRef, TransitionRecord, VideoSubmission};
use vireo_core::types::{DbId, Timestamp};

use super::status::{StatusId, SubmissionStatus};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `video_submissions` table.
///
/// The content reference is stored split into kind + value columns; use
/// [`SubmissionRow::content_ref`] to reassemble the tagged domain type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionRow {
    pub id: DbId,
    pub campaign_id: DbId,
    pub creator_id: DbId,
    pub content_kind: String,
    pub content_value: String,
    pub duration_secs: Option<f64>,
    pub state_id: StatusId,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SubmissionRow {
    /// Reassemble the opaque content reference.
    pub fn content_ref(&self) -> Result<ContentRef, CoreError> {
        match self.content_kind.as_str() {
            "hosted_url" => Ok(ContentRef::HostedUrl(self.content_value.clone())),
            "stored_file" => Ok(ContentRef::StoredFile(self.content_value.clone())),
            other => Err(CoreError::Internal(format!(
                "Unknown content kind '{other}' on submission {}",
                self.id
            ))),
        }
    }

    /// Build the domain entity, attaching an already-loaded history.
    pub fn into_domain(
        self,
        history: Vec<TransitionRecord>,
    ) -> Result<VideoSubmission, CoreError> {
        let content_ref = self.content_ref()?;
        Ok(VideoSubmission {
            id: self.id,
            campaign_id: self.campaign_id,
            creator_id: self.creator_id,
            content_ref,
            duration_secs: self.duration_secs,
            state: SubmissionStatus::state_from_id(self.state_id)?,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
            history,
        })
    }
}

/// Split a content reference into its storage columns (kind, value).
pub fn content_columns(content_ref: &ContentRef) -> (&'static str, &str) {
    match content_ref {
        ContentRef::HostedUrl(v) => ("hosted_url", v.as_str()),
        ContentRef::StoredFile(v) => ("stored_file", v.as_str()),
    }
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for creating a submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubmission {
    pub campaign_id: DbId,
    pub content_ref: ContentRef,
    /// Probed video duration, when the uploader knows it.
    #[validate(range(min = 0.0))]
    pub duration_secs: Option<f64>,
}

/// Raw feedback payload as it arrives on the wire.
///
/// Annotations may be in any order here; the handler normalizes through
/// `Feedback::normalized` before the payload reaches the state machine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackBody {
    #[serde(default)]
    pub general_text: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub due_date: Option<Timestamp>,
}

/// Request body for applying a single review action.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    /// Action name; the `request_changes` alias is accepted.
    pub action: String,
    /// The version the caller last read; the compare-and-swap guard.
    pub expected_version: i32,
    #[serde(default)]
    pub feedback: Option<FeedbackBody>,
}

/// Request body for a bulk review action.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkActionRequest {
    pub submission_ids: Vec<DbId>,
    pub action: String,
    /// Shared feedback applied to every item, where the action takes it.
    #[serde(default)]
    pub feedback: Option<FeedbackBody>,
    /// Opaque scheduling metadata (e.g. a common publication time). Passed
    /// through to the notification dispatcher, never interpreted here.
    #[serde(default)]
    pub scheduling_hint: Option<serde_json::Value>,
}

/// Query parameters for listing a campaign's submissions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionListQuery {
    /// Optional state name filter (e.g. `pending_admin_review`).
    pub state: Option<String>,
}
