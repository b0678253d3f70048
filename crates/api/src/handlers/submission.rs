//! Handlers for submission creation and reads.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use vireo_core::error::CoreError;
use vireo_core::submission::{SubmissionState, TransitionRecord};
use vireo_core::types::DbId;
use vireo_db::models::status::SubmissionStatus;
use vireo_db::models::submission::{CreateSubmission, SubmissionListQuery};
use vireo_db::repositories::{SubmissionRepo, TransitionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireCreator;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/submissions
///
/// Creator submits a video for review. The submission starts in
/// `pending_admin_review` at version 0; every later change goes through the
/// review engine.
pub async fn create_submission(
    RequireCreator(user): RequireCreator,
    State(state): State<AppState>,
    Json(input): Json<CreateSubmission>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    input.content_ref.validate().map_err(AppError::Core)?;

    let row = SubmissionRepo::create(
        &state.pool,
        input.campaign_id,
        user.user_id,
        &input.content_ref,
        input.duration_secs,
    )
    .await?;

    tracing::info!(
        submission_id = row.id,
        campaign_id = row.campaign_id,
        creator_id = user.user_id,
        "Submission created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// GET /api/v1/submissions/{submission_id}
///
/// Returns the submission with its current state, version, and full
/// transition history.
pub async fn get_submission(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = SubmissionRepo::find_by_id(&state.pool, submission_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VideoSubmission",
            id: submission_id,
        }))?;

    let history = load_history(&state, submission_id).await?;
    let submission = row.into_domain(history).map_err(AppError::Core)?;

    Ok(Json(DataResponse { data: submission }))
}

/// GET /api/v1/submissions/{submission_id}/history
///
/// Returns the submission's transition records, oldest first.
pub async fn get_history(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    SubmissionRepo::find_by_id(&state.pool, submission_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VideoSubmission",
            id: submission_id,
        }))?;

    let history = load_history(&state, submission_id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// GET /api/v1/campaigns/{campaign_id}/submissions
///
/// Lists a campaign's submissions, newest first, with an optional `state`
/// filter (`?state=pending_admin_review`).
pub async fn list_campaign_submissions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Query(query): Query<SubmissionListQuery>,
) -> AppResult<impl IntoResponse> {
    let state_id = query
        .state
        .as_deref()
        .map(|name| {
            SubmissionState::parse(name)
                .map(|s| SubmissionStatus::from_state(s).id())
                .map_err(AppError::Core)
        })
        .transpose()?;

    let rows = SubmissionRepo::list_for_campaign(&state.pool, campaign_id, state_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// Load and decode a submission's history rows.
async fn load_history(
    state: &AppState,
    submission_id: DbId,
) -> Result<Vec<TransitionRecord>, AppError> {
    TransitionRepo::list_for_submission(&state.pool, submission_id)
        .await?
        .iter()
        .map(|row| row.to_domain().map_err(AppError::Core))
        .collect()
}
