use crate::{
    application::{
        analysis::dto::{AnalyzeCommentsRequest, AnalyzeCommentsResponse},
        comments::dto::{
            AccountCommentsQuery, IngestCommentsRequest, IngestCommentsResponse,
            PostCommentsQuery, ReplyStatusRequest, SwipeQueueParams,
        },
    },
    domain::{comment::entity::Comment, shared::pagination::PaginatedResponse},
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

pub async fn ingest_comments(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    payload: Result<Json<IngestCommentsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestCommentsResponse>), AppError> {
    let Json(request) = payload?;
    let response = state.comments.ingest(&workspace_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_post_comments(
    State(state): State<AppState>,
    Path((workspace_id, post_id)): Path<(String, String)>,
    params: Result<Query<PostCommentsQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Comment>>, AppError> {
    let Query(params) = params?;
    let page = state
        .comments
        .post_comments(&workspace_id, &post_id, params)
        .await?;
    Ok(Json(page))
}

pub async fn get_account_comments(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    params: Result<Query<AccountCommentsQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Comment>>, AppError> {
    let Query(params) = params?;
    let page = state.comments.account_comments(&workspace_id, params).await?;
    Ok(Json(page))
}

/// An empty body analyses every not-yet-scored comment of the workspace.
pub async fn analyze_comments(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    payload: Result<Option<Json<AnalyzeCommentsRequest>>, JsonRejection>,
) -> Result<Json<AnalyzeCommentsResponse>, AppError> {
    let request = payload?.map(|Json(r)| r).unwrap_or_default();
    let response = state
        .analysis
        .analyze_workspace(&workspace_id, request)
        .await?;
    Ok(Json(response))
}

pub async fn get_swipe_queue(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    params: Result<Query<SwipeQueueParams>, QueryRejection>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let Query(params) = params?;
    let comments = state.comments.swipe_queue(&workspace_id, params).await?;
    Ok(Json(comments))
}

pub async fn update_reply_status(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ReplyStatusRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(comment_id) = path?;
    let Json(request) = payload?;
    state
        .comments
        .update_reply_status(comment_id, request)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
