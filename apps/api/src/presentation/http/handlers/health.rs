use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    pool_size: u32,
    llm_configured: bool,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "up",
        Err(e) => {
            tracing::error!(error = %e, "Health check: database unreachable");
            "down"
        }
    };

    let (code, status) = if database == "up" {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let response = HealthResponse {
        status,
        database,
        pool_size: state.db.size(),
        llm_configured: state.llm_configured,
        version: env!("CARGO_PKG_VERSION"),
    };

    (code, Json(response))
}
