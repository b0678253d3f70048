//! Bulk fan-out over the single-transition engine.

use futures::future::join_all;
use vireo_core::bulk::{dedupe_ids, BulkOutcome, BulkReport, MAX_BULK_IDS};
use vireo_core::error::CoreError;
use vireo_core::gate::PermissionGate;
use vireo_core::roles::ReviewerRole;
use vireo_core::submission::ReviewAction;
use vireo_core::types::DbId;
use vireo_db::models::status::SubmissionStatus;
use vireo_db::models::submission::FeedbackBody;
use vireo_db::DbPool;
use vireo_events::EventBus;

use super::review::apply_single;

/// Apply one action across a set of submissions.
///
/// Ids are deduplicated (first occurrence wins) and processed concurrently:
/// each submission is an independent CAS target, so no cross-submission
/// state is shared beyond the read-only action and feedback payload. Every
/// id gets its own entry in the returned report; an already-terminal
/// submission deterministically yields an `illegal_transition` failure, not
/// a silent no-op.
#[allow(clippy::too_many_arguments)]
pub async fn apply_bulk(
    pool: &DbPool,
    gate: &dyn PermissionGate,
    bus: &EventBus,
    submission_ids: &[DbId],
    actor_id: DbId,
    actor_role: ReviewerRole,
    action: ReviewAction,
    feedback_body: Option<&FeedbackBody>,
    scheduling_hint: Option<&serde_json::Value>,
) -> Result<BulkReport, CoreError> {
    let unique_ids = dedupe_ids(submission_ids);
    if unique_ids.len() > MAX_BULK_IDS {
        return Err(CoreError::Validation(format!(
            "Bulk operation exceeds the maximum of {MAX_BULK_IDS} submissions, got {}",
            unique_ids.len()
        )));
    }

    let tasks = unique_ids.iter().map(|&submission_id| async move {
        let result = apply_single(
            pool,
            gate,
            bus,
            submission_id,
            actor_id,
            actor_role,
            action,
            feedback_body,
            None,
            scheduling_hint,
        )
        .await;

        let outcome = match result {
            Ok(row) => match SubmissionStatus::state_from_id(row.state_id) {
                Ok(new_state) => BulkOutcome::Success {
                    new_state,
                    version: row.version,
                },
                Err(err) => BulkOutcome::failure(&err),
            },
            Err(err) => BulkOutcome::failure(&err),
        };
        (submission_id, outcome)
    });

    let mut report = BulkReport::default();
    for (submission_id, outcome) in join_all(tasks).await {
        report.insert(submission_id, outcome);
    }

    tracing::info!(
        total = report.results.len(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        action = %action,
        "Bulk review action applied"
    );

    Ok(report)
}
