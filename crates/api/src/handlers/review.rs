//! Handler for applying a single review action.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use vireo_core::submission::ReviewAction;
use vireo_core::types::DbId;
use vireo_db::models::submission::ActionRequest;

use crate::engine::review::apply_single;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/submissions/{submission_id}/actions
///
/// Applies one review action. The body carries the action name (the
/// `request_changes` alias is accepted), the version the caller last read,
/// and optional feedback. Which (state, role, action) moves are legal is
/// the transition table's decision; this handler only authenticates and
/// parses.
pub async fn apply_action(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
    Json(input): Json<ActionRequest>,
) -> AppResult<impl IntoResponse> {
    let action = ReviewAction::parse(&input.action).map_err(AppError::Core)?;

    let updated = apply_single(
        &state.pool,
        state.gate.as_ref(),
        state.event_bus.as_ref(),
        submission_id,
        auth.user_id,
        auth.role,
        action,
        input.feedback.as_ref(),
        Some(input.expected_version),
        None,
    )
    .await
    .map_err(AppError::Core)?;

    Ok(Json(DataResponse { data: updated }))
}
