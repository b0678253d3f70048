//! Per-item outcome types for bulk review operations.
//!
//! A bulk action is a thin fan-out over [`crate::workflow::apply_action`]:
//! one action and one shared feedback payload applied to many submissions,
//! each an independent compare-and-swap target. The result is always a
//! per-id map — one submission's failure never blocks, rolls back, or
//! masks another's success, and a batch is never summarized to a single
//! boolean.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::submission::SubmissionState;
use crate::types::DbId;

/// Maximum number of unique submissions in one bulk operation.
pub const MAX_BULK_IDS: usize = 500;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Machine-readable failure class for one item of a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkErrorKind {
    PermissionDenied,
    IllegalTransition,
    FeedbackRequired,
    VersionConflict,
    NotFound,
    Validation,
    Internal,
}

impl From<&CoreError> for BulkErrorKind {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::PermissionDenied { .. } => Self::PermissionDenied,
            CoreError::IllegalTransition { .. } => Self::IllegalTransition,
            CoreError::FeedbackRequired { .. } => Self::FeedbackRequired,
            CoreError::VersionConflict { .. } => Self::VersionConflict,
            CoreError::NotFound { .. } => Self::NotFound,
            CoreError::Validation(_) => Self::Validation,
            CoreError::Unauthorized(_) | CoreError::Forbidden(_) => Self::PermissionDenied,
            CoreError::Internal(_) => Self::Internal,
        }
    }
}

/// Result for a single submission within a bulk operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BulkOutcome {
    /// The transition committed.
    Success {
        new_state: SubmissionState,
        version: i32,
    },
    /// The transition was refused; the submission is untouched.
    Failure {
        kind: BulkErrorKind,
        message: String,
    },
}

impl BulkOutcome {
    /// Build a failure outcome from a domain error.
    pub fn failure(err: &CoreError) -> Self {
        Self::Failure {
            kind: BulkErrorKind::from(err),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Per-id results of one bulk operation, keyed by submission id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkReport {
    pub results: BTreeMap<DbId, BulkOutcome>,
}

impl BulkReport {
    pub fn insert(&mut self, submission_id: DbId, outcome: BulkOutcome) {
        self.results.insert(submission_id, outcome);
    }

    pub fn succeeded(&self) -> usize {
        self.results.values().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

// ---------------------------------------------------------------------------
// Id handling
// ---------------------------------------------------------------------------

/// Deduplicate a submission id list, keeping first-occurrence order.
///
/// Duplicates are allowed on input but each id is processed exactly once.
pub fn dedupe_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::ReviewerRole;
    use crate::submission::ReviewAction;

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        assert_eq!(dedupe_ids(&[3, 1, 3, 2, 1, 3]), vec![3, 1, 2]);
    }

    #[test]
    fn dedupe_of_empty_is_empty() {
        assert!(dedupe_ids(&[]).is_empty());
    }

    #[test]
    fn error_kind_mapping() {
        let err = CoreError::IllegalTransition {
            state: crate::submission::SubmissionState::Approved,
            role: ReviewerRole::Admin,
            action: ReviewAction::Reject,
        };
        assert_eq!(BulkErrorKind::from(&err), BulkErrorKind::IllegalTransition);

        let err = CoreError::FeedbackRequired {
            action: ReviewAction::Reject,
        };
        assert_eq!(BulkErrorKind::from(&err), BulkErrorKind::FeedbackRequired);

        let err = CoreError::VersionConflict {
            submission_id: 1,
            expected: 2,
        };
        assert_eq!(BulkErrorKind::from(&err), BulkErrorKind::VersionConflict);
    }

    #[test]
    fn report_counts() {
        let mut report = BulkReport::default();
        report.insert(
            1,
            BulkOutcome::Success {
                new_state: crate::submission::SubmissionState::Approved,
                version: 3,
            },
        );
        report.insert(
            2,
            BulkOutcome::failure(&CoreError::NotFound {
                entity: "VideoSubmission",
                id: 2,
            }),
        );
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn outcome_serde_shape() {
        let json = serde_json::to_value(BulkOutcome::Success {
            new_state: crate::submission::SubmissionState::NeedsRevision,
            version: 2,
        })
        .unwrap();
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["new_state"], "needs_revision");

        let json = serde_json::to_value(BulkOutcome::Failure {
            kind: BulkErrorKind::IllegalTransition,
            message: "moved".to_string(),
        })
        .unwrap();
        assert_eq!(json["outcome"], "failure");
        assert_eq!(json["kind"], "illegal_transition");
    }
}
