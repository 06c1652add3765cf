use super::helpers::{expect_status, get, json_request, read_json, send, spawn_app, unique_workspace};
use axum::http::StatusCode;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde_json::{Value, json};

fn sample(ws: &str, channel: &str, post: &str, metric: &str, value: f64, at: &str) -> Value {
    json!({
        "channel_id": channel,
        "workspace_id": ws,
        "platform": "linkedin",
        "post_id": post,
        "metric_type": metric,
        "value": value,
        "collected_at": at
    })
}

#[tokio::test]
async fn daily_buckets_average_samples_across_posts() {
    let Some(app) = spawn_app().await else { return };
    let ws = unique_workspace("stats");
    let channel = unique_workspace("channel");

    let save = json_request(
        "POST",
        "/api/v1/stats/metrics",
        &json!({ "samples": [
            sample(&ws, &channel, "post-a", "likes", 10.0, "2025-03-10T09:00:00Z"),
            sample(&ws, &channel, "post-b", "likes", 20.0, "2025-03-10T11:00:00Z"),
        ]}),
    );
    expect_status(send(&app.app, save).await, StatusCode::CREATED).await;

    let query = json!({
        "metrics": ["likes", "shares"],
        "start_date": "2025-03-01T00:00:00Z",
        "end_date": "2025-03-31T23:59:59Z",
        "granularity": "day"
    });
    let req = json_request(
        "POST",
        &format!("/api/v1/stats/workspace/{}/channel/{}", ws, channel),
        &query,
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let stats: Value = read_json(res).await;

    let likes = &stats["metrics"]["likes"];
    assert_eq!(likes["current_value"], 15.0);
    assert_eq!(likes["data_points"].as_array().map(Vec::len), Some(1));
    assert_eq!(likes["data_points"][0]["value"], 15.0);
    assert_eq!(stats["metrics"]["shares"]["current_value"], 0.0);

    let reversed = json_request(
        "POST",
        &format!("/api/v1/stats/workspace/{}", ws),
        &json!({
            "metrics": ["likes"],
            "start_date": "2025-03-31T00:00:00Z",
            "end_date": "2025-03-01T00:00:00Z"
        }),
    );
    expect_status(send(&app.app, reversed).await, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn same_day_recollection_overwrites_the_sample() {
    let Some(app) = spawn_app().await else { return };
    let ws = unique_workspace("overwrite");
    let channel = unique_workspace("channel");

    for (value, at) in [(10.0, "2025-04-02T08:00:00Z"), (30.0, "2025-04-02T20:00:00Z")] {
        let save = json_request(
            "POST",
            "/api/v1/stats/metrics",
            &json!({ "samples": [sample(&ws, &channel, "post-1", "likes", value, at)] }),
        );
        expect_status(send(&app.app, save).await, StatusCode::CREATED).await;
    }

    let uri = format!(
        "/api/v1/stats/workspace/{}/channel/{}/post/post-1",
        ws, channel
    );
    let res = expect_status(send(&app.app, get(&uri)).await, StatusCode::OK).await;
    let history: Value = read_json(res).await;
    let likes = history["metrics"]["likes"].as_array().expect("likes history");
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0]["value"], 30.0);

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM metrics WHERE channel_id = $1")
        .bind(&channel)
        .fetch_one(&app.db)
        .await
        .expect("count query failed");
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn collection_check_reads_last_collection_from_store() {
    let Some(app) = spawn_app().await else { return };
    let ws = unique_workspace("collect");
    let channel = unique_workspace("channel");
    let now = Utc::now();

    let post_created_at = (now - TimeDelta::minutes(30)).to_rfc3339();
    let collected_at = (now - TimeDelta::minutes(2)).to_rfc3339();
    let save = json_request(
        "POST",
        "/api/v1/stats/metrics",
        &json!({ "samples": [sample(&ws, &channel, "fresh-post", "likes", 3.0, &collected_at)] }),
    );
    expect_status(send(&app.app, save).await, StatusCode::CREATED).await;

    let collect_uri = format!(
        "/api/v1/stats/workspace/{}/channel/{}/collect",
        ws, channel
    );
    let req = json_request(
        "POST",
        &collect_uri,
        &json!({
            "platform": "linkedin",
            "post_id": "fresh-post",
            "post_created_at": post_created_at
        }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let decision: Value = read_json(res).await;
    assert_eq!(decision["should_collect"], false);
    assert!(decision["last_collection_at"].is_string());
    assert!(decision["next_collection_at"].is_string());
    assert_eq!(decision["metrics_to_collect"].as_array().map(Vec::len), Some(5));

    let never_collected = json_request(
        "POST",
        &collect_uri,
        &json!({
            "platform": "linkedin",
            "post_id": "other-post",
            "post_created_at": post_created_at
        }),
    );
    let res = expect_status(send(&app.app, never_collected).await, StatusCode::OK).await;
    let decision: Value = read_json(res).await;
    assert_eq!(decision["should_collect"], true);
    assert!(decision["last_collection_at"].is_null());

    let unsupported = json_request(
        "POST",
        &collect_uri,
        &json!({
            "platform": "tiktok",
            "post_id": "fresh-post",
            "post_created_at": post_created_at
        }),
    );
    expect_status(send(&app.app, unsupported).await, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn last_collection_is_the_latest_sample_of_any_metric() {
    let Some(app) = spawn_app().await else { return };
    let ws = unique_workspace("latest");
    let channel = unique_workspace("channel");

    let save = json_request(
        "POST",
        "/api/v1/stats/metrics",
        &json!({ "samples": [
            sample(&ws, &channel, "post-1", "likes", 4.0, "2025-04-01T09:00:00Z"),
            sample(&ws, &channel, "post-1", "comments", 2.0, "2025-04-03T10:00:00Z"),
            sample(&ws, &channel, "post-1", "shares", 1.0, "2025-04-03T08:00:00Z"),
            sample(&ws, &channel, "post-2", "likes", 9.0, "2025-04-05T12:00:00Z"),
        ]}),
    );
    expect_status(send(&app.app, save).await, StatusCode::CREATED).await;

    let req = json_request(
        "POST",
        &format!("/api/v1/stats/workspace/{}/channel/{}/collect", ws, channel),
        &json!({
            "platform": "linkedin",
            "post_id": "post-1",
            "post_created_at": "2025-03-30T00:00:00Z"
        }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let decision: Value = read_json(res).await;
    let last = decision["last_collection_at"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc));
    assert_eq!(last, Some(Utc.with_ymd_and_hms(2025, 4, 3, 10, 0, 0).unwrap()));
    assert_eq!(decision["should_collect"], true);
}

#[tokio::test]
async fn storage_failure_midway_saves_no_samples() {
    let Some(app) = spawn_app().await else { return };
    let ws = unique_workspace("atomic");
    let channel = unique_workspace("channel");

    let save = json_request(
        "POST",
        "/api/v1/stats/metrics",
        &json!({ "samples": [
            sample(&ws, &channel, "post-1", "likes", 5.0, "2025-04-01T09:00:00Z"),
            sample(&ws, &channel, "post\u{0000}2", "likes", 6.0, "2025-04-01T09:00:00Z"),
        ]}),
    );
    expect_status(send(&app.app, save).await, StatusCode::INTERNAL_SERVER_ERROR).await;

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM metrics WHERE channel_id = $1")
        .bind(&channel)
        .fetch_one(&app.db)
        .await
        .expect("count query failed");
    assert_eq!(stored, 0);
}
