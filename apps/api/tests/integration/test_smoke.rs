use super::helpers::{expect_status, get, read_json, send, spawn_app};
use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_reports_database_and_model_state() {
    let Some(app) = spawn_app().await else { return };
    let res = expect_status(send(&app.app, get("/health")).await, StatusCode::OK).await;
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "up");
    assert_eq!(body["llm_configured"], false);
}

#[tokio::test]
async fn networks_list_declared_capabilities() {
    let Some(app) = spawn_app().await else { return };
    let res = expect_status(send(&app.app, get("/api/v1/networks")).await, StatusCode::OK).await;
    let networks: Value = read_json(res).await;
    let linkedin = networks
        .as_array()
        .and_then(|all| all.iter().find(|n| n["platform"] == "linkedin"))
        .expect("linkedin should be registered");
    assert_eq!(
        linkedin["capabilities"],
        serde_json::json!(["posting", "messaging", "statistics"])
    );
}
