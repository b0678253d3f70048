//! Repository for the append-only `review_transitions` table.

use sqlx::PgPool;
use vireo_core::submission::TransitionRecord;
use vireo_core::types::DbId;

use crate::models::status::SubmissionStatus;
use crate::models::transition::TransitionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, submission_id, from_state_id, to_state_id, action, \
    actor_id, actor_role, feedback, seq, created_at";

/// Append and read operations for transition history. No update or delete
/// methods exist: history is append-only.
pub struct TransitionRepo;

impl TransitionRepo {
    /// Append a committed transition, returning the created row.
    ///
    /// `seq` is the submission version after the transition; the unique
    /// `(submission_id, seq)` constraint rejects double-appends that would
    /// indicate a CAS bypass.
    pub async fn append<'e, E>(
        executor: E,
        submission_id: DbId,
        record: &TransitionRecord,
        seq: i32,
    ) -> Result<TransitionRow, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let feedback = record
            .feedback
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let query = format!(
            "INSERT INTO review_transitions
                (submission_id, from_state_id, to_state_id, action, actor_id,
                 actor_role, feedback, seq)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TransitionRow>(&query)
            .bind(submission_id)
            .bind(SubmissionStatus::from_state(record.from_state).id())
            .bind(SubmissionStatus::from_state(record.to_state).id())
            .bind(record.action.as_str())
            .bind(record.actor_id)
            .bind(record.actor_role.as_str())
            .bind(feedback)
            .bind(seq)
            .fetch_one(executor)
            .await
    }

    /// List a submission's transitions, oldest first.
    pub async fn list_for_submission(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<TransitionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM review_transitions
             WHERE submission_id = $1
             ORDER BY seq ASC"
        );
        sqlx::query_as::<_, TransitionRow>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }

    /// Count a submission's committed transitions.
    pub async fn count_for_submission(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM review_transitions WHERE submission_id = $1",
        )
        .bind(submission_id)
        .fetch_one(pool)
        .await
    }
}
