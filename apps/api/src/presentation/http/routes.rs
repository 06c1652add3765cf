use super::{
    handlers::{comments, easy_reply, health, networks, stats},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn create_router(state: AppState) -> Router {
    let comment_routes = Router::new()
        .route(
            "/api/v1/comments/{workspace_id}/ingest",
            post(comments::ingest_comments),
        )
        .route(
            "/api/v1/comments/post/{workspace_id}/{post_id}",
            get(comments::get_post_comments),
        )
        .route(
            "/api/v1/comments/account/{workspace_id}",
            get(comments::get_account_comments),
        )
        .route(
            "/api/v1/comments/analyze/{workspace_id}",
            post(comments::analyze_comments),
        )
        .route(
            "/api/v1/comments/swipe/{workspace_id}",
            get(comments::get_swipe_queue),
        )
        .route(
            "/api/v1/comments/reply/{comment_id}",
            put(comments::update_reply_status),
        );

    let easy_reply_routes = Router::new()
        .route(
            "/api/v1/easy-reply/session/start",
            post(easy_reply::start_session),
        )
        .route(
            "/api/v1/easy-reply/session/{session_id}",
            get(easy_reply::get_session),
        )
        .route(
            "/api/v1/easy-reply/session/{session_id}/end",
            put(easy_reply::end_session),
        )
        .route("/api/v1/easy-reply/swipe", post(easy_reply::record_swipe))
        .route(
            "/api/v1/easy-reply/stats/{workspace_id}",
            get(easy_reply::activity_stats),
        )
        .route(
            "/api/v1/easy-reply/suggest-reply",
            post(easy_reply::suggest_reply),
        );

    let stats_routes = Router::new()
        .route(
            "/api/v1/stats/workspace/{workspace_id}",
            post(stats::workspace_stats),
        )
        .route(
            "/api/v1/stats/workspace/{workspace_id}/channel/{channel_id}",
            post(stats::channel_stats),
        )
        .route(
            "/api/v1/stats/workspace/{workspace_id}/channel/{channel_id}/collect",
            post(stats::check_collection),
        )
        .route(
            "/api/v1/stats/workspace/{workspace_id}/channel/{channel_id}/post/{post_id}",
            get(stats::post_metrics),
        )
        .route("/api/v1/stats/metrics", post(stats::save_metrics));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/networks", get(networks::list_networks))
        .merge(comment_routes)
        .merge(easy_reply_routes)
        .merge(stats_routes)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
