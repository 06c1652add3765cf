use crate::{
    application::{
        suggest_reply::dto::{SuggestReplyRequest, SuggestReplyResponse},
        triage::dto::{ActivitySummaryParams, RecordSwipeRequest, StartSessionRequest},
    },
    domain::triage::entity::{ActivitySummary, SwipeOutcome, SwipeSession},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

pub async fn start_session(
    State(state): State<AppState>,
    payload: Result<Json<StartSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SwipeSession>), AppError> {
    let Json(request) = payload?;
    let session = state.triage.start_session(request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn get_session(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SwipeSession>, AppError> {
    let Path(session_id) = path?;
    Ok(Json(state.triage.get_session(session_id).await?))
}

/// Closes the session and returns it with its final counters.
pub async fn end_session(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SwipeSession>, AppError> {
    let Path(session_id) = path?;
    Ok(Json(state.triage.end_session(session_id).await?))
}

pub async fn record_swipe(
    State(state): State<AppState>,
    payload: Result<Json<RecordSwipeRequest>, JsonRejection>,
) -> Result<Json<SwipeOutcome>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.triage.record_swipe(request).await?))
}

pub async fn activity_stats(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    params: Result<Query<ActivitySummaryParams>, QueryRejection>,
) -> Result<Json<ActivitySummary>, AppError> {
    let Query(params) = params?;
    let summary = state
        .triage
        .activity_summary(&workspace_id, params)
        .await?;
    Ok(Json(summary))
}

pub async fn suggest_reply(
    State(state): State<AppState>,
    payload: Result<Json<SuggestReplyRequest>, JsonRejection>,
) -> Result<Json<SuggestReplyResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.suggestions.suggest(request).await?))
}
