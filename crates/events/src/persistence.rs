//! Durable event persistence service.
//!
//! [`EventPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and writes every received [`ReviewEvent`] to the
//! `review_events` table. It runs as a long-lived background task and shuts
//! down when the bus sender is dropped.

use tokio::sync::broadcast;
use vireo_db::repositories::ReviewEventRepo;
use vireo_db::DbPool;

use crate::bus::ReviewEvent;

/// Background service that persists review events to the database.
pub struct EventPersistence;

impl EventPersistence {
    /// Run the persistence loop.
    ///
    /// Subscribes via the provided `receiver` and persists every event it
    /// receives. The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<ReviewEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            submission_id = event.submission_id,
                            "Failed to persist review event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Event persistence lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event to the `review_events` table.
    ///
    /// The full event serializes into the payload column; the indexed
    /// columns duplicate the fields audit readers filter on.
    async fn persist(pool: &DbPool, event: &ReviewEvent) -> Result<(), sqlx::Error> {
        let payload = serde_json::to_value(event)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        ReviewEventRepo::insert(
            pool,
            event.event_id,
            &event.event_type,
            event.submission_id,
            event.campaign_id,
            event.actor_id,
            &payload,
        )
        .await?;
        Ok(())
    }
}
