//! Repository for the `review_events` table.

use sqlx::PgPool;
use uuid::Uuid;
use vireo_core::types::DbId;

use crate::models::event::ReviewEventRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, event_type, submission_id, campaign_id, \
    actor_id, payload, created_at";

/// Durable storage for published review events.
pub struct ReviewEventRepo;

impl ReviewEventRepo {
    /// Insert one event, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        event_id: Uuid,
        event_type: &str,
        submission_id: DbId,
        campaign_id: DbId,
        actor_id: DbId,
        payload: &serde_json::Value,
    ) -> Result<ReviewEventRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO review_events
                (event_id, event_type, submission_id, campaign_id, actor_id, payload)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReviewEventRow>(&query)
            .bind(event_id)
            .bind(event_type)
            .bind(submission_id)
            .bind(campaign_id)
            .bind(actor_id)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// List a submission's events, oldest first.
    pub async fn list_for_submission(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<ReviewEventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM review_events
             WHERE submission_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ReviewEventRow>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }
}
