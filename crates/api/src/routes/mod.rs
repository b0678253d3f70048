pub mod health;
pub mod submission;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /submissions                                  create (POST, creator)
/// /submissions/bulk-actions                     bulk review action (POST)
/// /submissions/{submission_id}                  get with history (GET)
/// /submissions/{submission_id}/history          transition records (GET)
/// /submissions/{submission_id}/actions          apply review action (POST)
///
/// /campaigns/{campaign_id}/submissions          campaign review queue (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/submissions", submission::submission_router())
        .nest("/campaigns", submission::campaign_router())
}
