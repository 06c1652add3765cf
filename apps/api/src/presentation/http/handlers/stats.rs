use crate::{
    application::metrics::dto::{
        CollectionCheckRequest, CollectionCheckResponse, PostMetricsResponse, SaveMetricsRequest,
        SaveMetricsResponse, StatsQueryRequest,
    },
    domain::metrics::entity::StatsResponse,
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

pub async fn workspace_stats(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    payload: Result<Json<StatsQueryRequest>, JsonRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let Json(request) = payload?;
    let stats = state
        .metrics
        .get_stats(&workspace_id, None, request)
        .await?;
    Ok(Json(stats))
}

/// Same as [`workspace_stats`] but restricted to one channel, ignoring any
/// `channel_ids` in the body.
pub async fn channel_stats(
    State(state): State<AppState>,
    Path((workspace_id, channel_id)): Path<(String, String)>,
    payload: Result<Json<StatsQueryRequest>, JsonRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let Json(request) = payload?;
    let stats = state
        .metrics
        .get_stats(&workspace_id, Some(&channel_id), request)
        .await?;
    Ok(Json(stats))
}

pub async fn check_collection(
    State(state): State<AppState>,
    Path((_workspace_id, channel_id)): Path<(String, String)>,
    payload: Result<Json<CollectionCheckRequest>, JsonRejection>,
) -> Result<Json<CollectionCheckResponse>, AppError> {
    let Json(request) = payload?;
    let decision = state.metrics.check_collection(&channel_id, request).await?;
    Ok(Json(decision))
}

pub async fn save_metrics(
    State(state): State<AppState>,
    payload: Result<Json<SaveMetricsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveMetricsResponse>), AppError> {
    let Json(request) = payload?;
    let response = state.metrics.save_metrics(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn post_metrics(
    State(state): State<AppState>,
    Path((workspace_id, channel_id, post_id)): Path<(String, String, String)>,
) -> Result<Json<PostMetricsResponse>, AppError> {
    let history = state
        .metrics
        .post_metrics(&workspace_id, &channel_id, &post_id)
        .await?;
    Ok(Json(history))
}
