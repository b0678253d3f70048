//! Submission entity, workflow states, and review actions.
//!
//! A [`VideoSubmission`] is created once by the creator's submission act and
//! afterwards mutated only through validated transitions computed by
//! [`crate::workflow::apply_action`]. It is never deleted: terminal states
//! end mutation but the record persists for audit and analytics consumers.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::feedback::Feedback;
use crate::roles::ReviewerRole;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// SubmissionState
// ---------------------------------------------------------------------------

/// All valid state name strings.
pub const VALID_STATES: &[&str] = &[
    "pending_admin_review",
    "pending_client_review",
    "client_approved",
    "needs_revision",
    "approved",
    "rejected",
];

/// Workflow state of a submission.
///
/// `Approved` and `Rejected` are terminal: the transition table has no
/// entry with a terminal from-state, so every later action surfaces
/// [`CoreError::IllegalTransition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    PendingAdminReview,
    PendingClientReview,
    ClientApproved,
    NeedsRevision,
    Approved,
    Rejected,
}

impl SubmissionState {
    /// Return the state as its canonical lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingAdminReview => "pending_admin_review",
            Self::PendingClientReview => "pending_client_review",
            Self::ClientApproved => "client_approved",
            Self::NeedsRevision => "needs_revision",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse a state from its string name.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending_admin_review" => Ok(Self::PendingAdminReview),
            "pending_client_review" => Ok(Self::PendingClientReview),
            "client_approved" => Ok(Self::ClientApproved),
            "needs_revision" => Ok(Self::NeedsRevision),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid submission state '{s}'. Must be one of: {}",
                VALID_STATES.join(", ")
            ))),
        }
    }

    /// Whether this state ends the workflow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReviewAction
// ---------------------------------------------------------------------------

/// All valid action name strings (canonical forms).
pub const VALID_ACTIONS: &[&str] = &[
    "approve_direct",
    "send_to_client",
    "reject",
    "request_revision",
    "approve",
    "final_approve",
    "resubmit",
];

/// Accepted alias for `request_revision` at the parse boundary.
const REQUEST_CHANGES_ALIAS: &str = "request_changes";

/// An action a role can request against a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Admin approves without a client review stage.
    ApproveDirect,
    /// Admin forwards the submission for client review.
    SendToClient,
    /// Admin terminally rejects. Feedback mandatory.
    Reject,
    /// Admin or client sends the submission back for rework. Feedback
    /// mandatory. Accepted under the alias `request_changes` on input.
    RequestRevision,
    /// Client approves; final authority stays with admin.
    Approve,
    /// Admin confirms a client-approved submission.
    FinalApprove,
    /// Creator re-enters admin review after a revision request.
    Resubmit,
}

impl ReviewAction {
    /// Return the action as its canonical lowercase string.
    ///
    /// The alias `request_changes` is never produced on output; stored
    /// records always carry the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApproveDirect => "approve_direct",
            Self::SendToClient => "send_to_client",
            Self::Reject => "reject",
            Self::RequestRevision => "request_revision",
            Self::Approve => "approve",
            Self::FinalApprove => "final_approve",
            Self::Resubmit => "resubmit",
        }
    }

    /// Parse an action from its string name, normalizing the
    /// `request_changes` alias to [`ReviewAction::RequestRevision`].
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "approve_direct" => Ok(Self::ApproveDirect),
            "send_to_client" => Ok(Self::SendToClient),
            "reject" => Ok(Self::Reject),
            "request_revision" | REQUEST_CHANGES_ALIAS => Ok(Self::RequestRevision),
            "approve" => Ok(Self::Approve),
            "final_approve" => Ok(Self::FinalApprove),
            "resubmit" => Ok(Self::Resubmit),
            _ => Err(CoreError::Validation(format!(
                "Invalid review action '{s}'. Must be one of: {}",
                VALID_ACTIONS.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ContentRef
// ---------------------------------------------------------------------------

/// Reference to the submitted video content.
///
/// Opaque to the workflow core; resolution to a playable URL is the storage
/// collaborator's concern and is never performed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContentRef {
    /// An externally hosted video URL.
    HostedUrl(String),
    /// A storage key for an uploaded file.
    StoredFile(String),
}

impl ContentRef {
    /// Validate that the reference is non-blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        let value = match self {
            Self::HostedUrl(v) | Self::StoredFile(v) => v,
        };
        if value.trim().is_empty() {
            return Err(CoreError::Validation(
                "Content reference must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TransitionRecord / VideoSubmission
// ---------------------------------------------------------------------------

/// One committed transition in a submission's append-only history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from_state: SubmissionState,
    pub to_state: SubmissionState,
    pub action: ReviewAction,
    pub actor_id: DbId,
    pub actor_role: ReviewerRole,
    pub timestamp: Timestamp,
    /// Present only for actions that require or permit feedback. Immutable
    /// once committed; corrections take a new transition.
    pub feedback: Option<Feedback>,
}

/// A creator-submitted video moving through review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSubmission {
    pub id: DbId,
    pub campaign_id: DbId,
    pub creator_id: DbId,
    pub content_ref: ContentRef,
    /// Known video duration in seconds, when probed. Bounds annotation
    /// offsets; `None` disables the upper-bound check.
    pub duration_secs: Option<f64>,
    pub state: SubmissionState,
    /// Monotonic counter incremented on every committed transition; the
    /// compare-and-swap guard for concurrent review (equals `history.len()`).
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Committed transitions, oldest first. Append-only.
    pub history: Vec<TransitionRecord>,
}

impl VideoSubmission {
    /// Whether the workflow has ended for this submission.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
