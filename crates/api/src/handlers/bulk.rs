//! Handler for bulk review actions.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use vireo_core::submission::ReviewAction;
use vireo_db::models::submission::BulkActionRequest;

use crate::engine::bulk::apply_bulk;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/submissions/bulk-actions
///
/// Applies one action (with one shared feedback payload) across a set of
/// submission ids. The response is always a per-id result map; partial
/// failure is the expected shape, not an error. An optional
/// `scheduling_hint` passes through to the notification dispatcher
/// untouched.
pub async fn apply_bulk_action(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkActionRequest>,
) -> AppResult<impl IntoResponse> {
    let action = ReviewAction::parse(&input.action).map_err(AppError::Core)?;

    let report = apply_bulk(
        &state.pool,
        state.gate.as_ref(),
        state.event_bus.as_ref(),
        &input.submission_ids,
        auth.user_id,
        auth.role,
        action,
        input.feedback.as_ref(),
        input.scheduling_hint.as_ref(),
    )
    .await
    .map_err(AppError::Core)?;

    Ok(Json(DataResponse { data: report }))
}
