//! Single-transition orchestration.

use vireo_core::error::CoreError;
use vireo_core::feedback::Feedback;
use vireo_core::gate::PermissionGate;
use vireo_core::roles::ReviewerRole;
use vireo_core::submission::ReviewAction;
use vireo_core::types::DbId;
use vireo_core::workflow;
use vireo_db::models::status::SubmissionStatus;
use vireo_db::models::submission::{FeedbackBody, SubmissionRow};
use vireo_db::repositories::{SubmissionRepo, TransitionRepo};
use vireo_db::DbPool;
use vireo_events::{EventBus, ReviewEvent};

/// Map a storage failure into the domain error taxonomy.
fn db_error(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("Database error: {err}"))
}

/// Validate and commit one review action against one submission.
///
/// The flow implements the read-compute-CAS contract:
///
/// 1. Read the submission (and reject a stale `expected_version` up front).
/// 2. Normalize the feedback payload against the submission's known
///    duration.
/// 3. Compute the transition via [`workflow::apply_action`] (gate, table,
///    feedback rule — in that order).
/// 4. In one transaction, write the new state conditioned on the version
///    being unchanged and append the transition record. A failed guard is a
///    [`CoreError::VersionConflict`]; the caller must refetch and
///    re-validate, never blindly retry.
/// 5. Publish the committed event — once per committed transition.
///
/// `expected_version` is the version the HTTP caller last read; `None`
/// (bulk mode) accepts whatever version the read in step 1 returns.
#[allow(clippy::too_many_arguments)]
pub async fn apply_single(
    pool: &DbPool,
    gate: &dyn PermissionGate,
    bus: &EventBus,
    submission_id: DbId,
    actor_id: DbId,
    actor_role: ReviewerRole,
    action: ReviewAction,
    feedback_body: Option<&FeedbackBody>,
    expected_version: Option<i32>,
    scheduling_hint: Option<&serde_json::Value>,
) -> Result<SubmissionRow, CoreError> {
    let row = SubmissionRepo::find_by_id(pool, submission_id)
        .await
        .map_err(db_error)?
        .ok_or(CoreError::NotFound {
            entity: "VideoSubmission",
            id: submission_id,
        })?;

    if let Some(expected) = expected_version {
        if expected != row.version {
            return Err(CoreError::VersionConflict {
                submission_id,
                expected,
            });
        }
    }

    let feedback = feedback_body
        .map(|body| {
            Feedback::normalized(
                body.general_text.clone(),
                body.annotations.clone(),
                body.due_date,
                row.duration_secs,
            )
        })
        .transpose()?;

    let submission = row.into_domain(Vec::new())?;
    let outcome =
        workflow::apply_action(&submission, actor_id, actor_role, action, feedback, gate).await?;

    let mut tx = pool.begin().await.map_err(db_error)?;

    let updated = SubmissionRepo::advance_state(
        &mut *tx,
        submission_id,
        submission.version,
        SubmissionStatus::from_state(outcome.next_state),
    )
    .await
    .map_err(db_error)?
    .ok_or(CoreError::VersionConflict {
        submission_id,
        expected: submission.version,
    })?;

    TransitionRepo::append(&mut *tx, submission_id, &outcome.record, updated.version)
        .await
        .map_err(db_error)?;

    tx.commit().await.map_err(db_error)?;

    let mut event = ReviewEvent::for_transition(&submission, &outcome.record);
    if let Some(hint) = scheduling_hint {
        event = event.with_scheduling_hint(hint.clone());
    }
    bus.publish(event);

    tracing::info!(
        submission_id,
        actor_id,
        action = %action,
        from_state = %outcome.record.from_state,
        to_state = %outcome.record.to_state,
        version = updated.version,
        "Review transition committed"
    );

    Ok(updated)
}
