//! Durable review event models.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use vireo_core::types::{DbId, Timestamp};

/// A row from the `review_events` table.
///
/// The durable trail behind the in-process bus: one row per committed
/// transition, consumed by audit and analytics readers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewEventRow {
    pub id: DbId,
    /// Idempotency key assigned at publish time.
    pub event_id: Uuid,
    pub event_type: String,
    pub submission_id: DbId,
    pub campaign_id: DbId,
    pub actor_id: DbId,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
