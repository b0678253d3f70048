//! The review workflow state machine.
//!
//! The entire set of legal moves is one transition table keyed by
//! (state, role, action) — a single lookup decides legality, so every legal
//! path is enumerable and testable. [`apply_action`] validates a requested
//! action against that table plus the external permission gate and the
//! feedback rule, and computes the resulting transition without touching
//! storage: the caller owns the atomic compare-and-swap write.

use crate::error::CoreError;
use crate::feedback::Feedback;
use crate::gate::PermissionGate;
use crate::roles::ReviewerRole;
use crate::submission::{ReviewAction, SubmissionState, TransitionRecord, VideoSubmission};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// Feedback requirement attached to a transition table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackRule {
    /// The action does not take feedback; a non-empty payload is rejected
    /// rather than silently dropped.
    NotAccepted,
    /// Feedback is recorded when present and non-empty.
    Optional,
    /// A non-empty feedback payload is mandatory. Negative outcomes must
    /// never reach the creator unexplained.
    Required,
}

/// Look up the transition table entry for a (state, role, action) triple.
///
/// Returns the next state and the feedback rule, or `None` when the triple
/// is not a legal move. Terminal states have no entries at all, which makes
/// them absorbing.
pub fn transition_for(
    state: SubmissionState,
    role: ReviewerRole,
    action: ReviewAction,
) -> Option<(SubmissionState, FeedbackRule)> {
    use FeedbackRule::{NotAccepted, Optional, Required};
    use ReviewAction as A;
    use ReviewerRole as R;
    use SubmissionState as S;

    match (state, role, action) {
        // Admin review stage.
        (S::PendingAdminReview, R::Admin, A::ApproveDirect) => Some((S::Approved, Optional)),
        (S::PendingAdminReview, R::Admin, A::SendToClient) => {
            Some((S::PendingClientReview, NotAccepted))
        }
        (S::PendingAdminReview, R::Admin, A::Reject) => Some((S::Rejected, Required)),

        // Client review stage. Clients never terminally reject: approve or
        // request a revision only, with final authority staying with admin.
        (S::PendingClientReview, R::Client, A::Approve) => Some((S::ClientApproved, Optional)),

        // Admin confirmation of a client-approved submission.
        (S::ClientApproved, R::Admin, A::FinalApprove) => Some((S::Approved, Optional)),

        // Revision loop back to the start of admin review.
        (S::NeedsRevision, R::Creator, A::Resubmit) => {
            Some((S::PendingAdminReview, NotAccepted))
        }

        // request_revision is available to admin and client from every
        // non-terminal state.
        (state, R::Admin | R::Client, A::RequestRevision) if !state.is_terminal() => {
            Some((S::NeedsRevision, Required))
        }

        _ => None,
    }
}

/// Every action, in canonical declaration order.
const ALL_ACTIONS: &[ReviewAction] = &[
    ReviewAction::ApproveDirect,
    ReviewAction::SendToClient,
    ReviewAction::Reject,
    ReviewAction::RequestRevision,
    ReviewAction::Approve,
    ReviewAction::FinalApprove,
    ReviewAction::Resubmit,
];

/// Enumerate the actions a role may legally take from a state.
pub fn legal_actions(state: SubmissionState, role: ReviewerRole) -> Vec<ReviewAction> {
    ALL_ACTIONS
        .iter()
        .copied()
        .filter(|action| transition_for(state, role, *action).is_some())
        .collect()
}

// ---------------------------------------------------------------------------
// apply_action
// ---------------------------------------------------------------------------

/// The computed result of a legal action.
///
/// Nothing has been persisted when this is returned: the caller writes the
/// new state, the record, and the version bump as one atomic unit,
/// conditioned on `submission.version` being unchanged since the read.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub next_state: SubmissionState,
    /// `submission.version + 1`; the CAS write asserts the old value.
    pub next_version: i32,
    pub record: TransitionRecord,
}

/// Validate and compute a transition for `submission`.
///
/// Preconditions are checked in order: (a) the permission gate grants the
/// role+action generally, (b) the (state, role, action) triple exists in
/// the transition table, (c) the entry's feedback rule is satisfied. The
/// request is never coerced: each failed precondition surfaces its own
/// typed error and leaves the submission untouched.
pub async fn apply_action(
    submission: &VideoSubmission,
    actor_id: DbId,
    actor_role: ReviewerRole,
    action: ReviewAction,
    feedback: Option<Feedback>,
    gate: &dyn PermissionGate,
) -> Result<TransitionOutcome, CoreError> {
    if !gate.check(actor_id, actor_role, action).await {
        return Err(CoreError::PermissionDenied {
            role: actor_role,
            action,
        });
    }

    let Some((next_state, rule)) = transition_for(submission.state, actor_role, action) else {
        return Err(CoreError::IllegalTransition {
            state: submission.state,
            role: actor_role,
            action,
        });
    };

    let feedback = resolve_feedback(action, rule, feedback)?;

    let record = TransitionRecord {
        from_state: submission.state,
        to_state: next_state,
        action,
        actor_id,
        actor_role,
        timestamp: chrono::Utc::now(),
        feedback,
    };

    Ok(TransitionOutcome {
        next_state,
        next_version: submission.version + 1,
        record,
    })
}

/// Apply the feedback rule to the caller-supplied payload.
///
/// Empty payloads normalize to `None`; a `Required` rule turns that into
/// [`CoreError::FeedbackRequired`], and a `NotAccepted` rule rejects any
/// non-empty payload instead of dropping it.
fn resolve_feedback(
    action: ReviewAction,
    rule: FeedbackRule,
    feedback: Option<Feedback>,
) -> Result<Option<Feedback>, CoreError> {
    let non_empty = feedback.filter(|f| !f.is_empty());
    match rule {
        FeedbackRule::Required => {
            non_empty.map(Some).ok_or(CoreError::FeedbackRequired { action })
        }
        FeedbackRule::Optional => Ok(non_empty),
        FeedbackRule::NotAccepted => match non_empty {
            Some(_) => Err(CoreError::Validation(format!(
                "Action '{action}' does not accept feedback"
            ))),
            None => Ok(None),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
