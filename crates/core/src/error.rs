use crate::roles::ReviewerRole;
use crate::submission::{ReviewAction, SubmissionState};
use crate::types::DbId;

/// Domain error taxonomy for the review workflow.
///
/// The four review-specific variants (`PermissionDenied`,
/// `IllegalTransition`, `FeedbackRequired`, `VersionConflict`) are terminal,
/// typed failures returned to the caller; none are retried internally.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The actor lacks the general capability for this action, independent
    /// of the submission's current state.
    #[error("Permission denied: role '{role}' may not perform '{action}'")]
    PermissionDenied {
        role: ReviewerRole,
        action: ReviewAction,
    },

    /// The (state, role, action) triple has no entry in the transition
    /// table. Often means the submission moved under the caller.
    #[error("Illegal transition: '{action}' is not available to role '{role}' from state '{state}'")]
    IllegalTransition {
        state: SubmissionState,
        role: ReviewerRole,
        action: ReviewAction,
    },

    /// The action mandates feedback and the caller supplied none (or an
    /// empty payload). No state mutation has occurred.
    #[error("Feedback required: '{action}' must include non-empty feedback")]
    FeedbackRequired { action: ReviewAction },

    /// The compare-and-swap write lost a concurrent race. The caller must
    /// refetch the submission and re-validate from the fresh state.
    #[error("Version conflict on submission {submission_id}: expected version {expected}")]
    VersionConflict { submission_id: DbId, expected: i32 },

    #[error("Internal error: {0}")]
    Internal(String),
}
