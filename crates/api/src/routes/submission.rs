//! Route definitions for the submission review workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{bulk, review, submission};
use crate::state::AppState;

/// Submission-scoped routes, merged into `/submissions`.
///
/// ```text
/// POST   /                                create_submission
/// POST   /bulk-actions                    apply_bulk_action
/// GET    /{submission_id}                 get_submission
/// GET    /{submission_id}/history         get_history
/// POST   /{submission_id}/actions         apply_action
/// ```
pub fn submission_router() -> Router<AppState> {
    Router::new()
        .route("/", post(submission::create_submission))
        .route("/bulk-actions", post(bulk::apply_bulk_action))
        .route("/{submission_id}", get(submission::get_submission))
        .route("/{submission_id}/history", get(submission::get_history))
        .route("/{submission_id}/actions", post(review::apply_action))
}

/// Campaign-scoped routes, merged into `/campaigns`.
///
/// ```text
/// GET    /{campaign_id}/submissions       list_campaign_submissions
/// ```
pub fn campaign_router() -> Router<AppState> {
    Router::new().route(
        "/{campaign_id}/submissions",
        get(submission::list_campaign_submissions),
    )
}
