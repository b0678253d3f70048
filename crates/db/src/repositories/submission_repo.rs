//! Repository for the `video_submissions` table.

use sqlx::PgPool;
use vireo_core::submission::ContentRef;
use vireo_core::types::DbId;

use crate::models::status::{StatusId, SubmissionStatus};
use crate::models::submission::{content_columns, SubmissionRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, creator_id, content_kind, content_value, \
    duration_secs, state_id, version, created_at, updated_at";

/// Provides CRUD and the version-guarded state write for submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a new submission in the initial state, returning the created
    /// row. State and version use the column defaults
    /// (`pending_admin_review`, 0).
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        creator_id: DbId,
        content_ref: &ContentRef,
        duration_secs: Option<f64>,
    ) -> Result<SubmissionRow, sqlx::Error> {
        let (kind, value) = content_columns(content_ref);
        let query = format!(
            "INSERT INTO video_submissions
                (campaign_id, creator_id, content_kind, content_value, duration_secs)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(campaign_id)
            .bind(creator_id)
            .bind(kind)
            .bind(value)
            .bind(duration_secs)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubmissionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM video_submissions WHERE id = $1");
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a campaign's submissions, newest first, optionally filtered by
    /// state.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        state_id: Option<StatusId>,
    ) -> Result<Vec<SubmissionRow>, sqlx::Error> {
        match state_id {
            Some(state_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM video_submissions
                     WHERE campaign_id = $1 AND state_id = $2
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, SubmissionRow>(&query)
                    .bind(campaign_id)
                    .bind(state_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM video_submissions
                     WHERE campaign_id = $1
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, SubmissionRow>(&query)
                    .bind(campaign_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Compare-and-swap state advance.
    ///
    /// Writes the new state and bumps the version only if `version` still
    /// equals `expected_version`. Returns `None` when the guard fails —
    /// the caller maps that to a version conflict and must not retry
    /// blindly.
    pub async fn advance_state<'e, E>(
        executor: E,
        id: DbId,
        expected_version: i32,
        new_state: SubmissionStatus,
    ) -> Result<Option<SubmissionRow>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE video_submissions
             SET state_id = $3, version = version + 1, updated_at = now()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(new_state.id())
            .fetch_optional(executor)
            .await?;

        if updated.is_none() {
            tracing::debug!(
                submission_id = id,
                expected_version,
                "Version guard failed, no rows updated"
            );
        }
        Ok(updated)
    }
}
