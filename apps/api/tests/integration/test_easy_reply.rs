use super::helpers::{
    expect_status, get, json_request, read_json, send, spawn_app, unique_workspace, TestApp,
};
use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

async fn seed_comments(app: &TestApp, ws: &str) -> Vec<(String, String)> {
    let channel = unique_workspace("channel");
    let comments: Vec<Value> = ["Where can I find the slides?", "First!"]
        .iter()
        .enumerate()
        .map(|(i, content)| {
            json!({
                "workspace_id": ws,
                "channel_id": channel,
                "platform": "linkedin",
                "platform_comment_id": format!("triage-{}", i),
                "content": content,
                "post_id": "post-1"
            })
        })
        .collect();
    let ingest = json_request(
        "POST",
        &format!("/api/v1/comments/{}/ingest", ws),
        &json!({ "comments": comments }),
    );
    expect_status(send(&app.app, ingest).await, StatusCode::CREATED).await;

    let res = expect_status(
        send(&app.app, get(&format!("/api/v1/comments/account/{}", ws))).await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    page["items"]
        .as_array()
        .expect("items should be an array")
        .iter()
        .map(|c| {
            (
                c["platform_comment_id"].as_str().unwrap_or_default().to_string(),
                c["id"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn id_of(comments: &[(String, String)], platform_comment_id: &str) -> String {
    comments
        .iter()
        .find(|(pid, _)| pid == platform_comment_id)
        .map(|(_, id)| id.clone())
        .expect("seeded comment missing")
}

async fn start_session(app: &TestApp, ws: &str) -> String {
    let req = json_request(
        "POST",
        "/api/v1/easy-reply/session/start",
        &json!({ "workspace_id": ws, "user_id": "user-1" }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::CREATED).await;
    let session: Value = read_json(res).await;
    assert_eq!(session["comments_reviewed"], 0);
    assert_eq!(session["session_metadata"]["started_from"], "web_app");
    session["id"].as_str().expect("missing session id").to_string()
}

#[tokio::test]
async fn swipes_update_comments_and_ending_is_repeatable() {
    let Some(app) = spawn_app().await else { return };
    let ws = unique_workspace("triage");
    let comments = seed_comments(&app, &ws).await;
    let question = id_of(&comments, "triage-0");
    let noise = id_of(&comments, "triage-1");
    let session_id = start_session(&app, &ws).await;

    let right = json_request(
        "POST",
        "/api/v1/easy-reply/swipe",
        &json!({
            "session_id": session_id,
            "comment_id": question,
            "action": "swipe_right",
            "reply_content": "They are linked in the post description."
        }),
    );
    let res = expect_status(send(&app.app, right).await, StatusCode::OK).await;
    let outcome: Value = read_json(res).await;
    assert_eq!(outcome["comment_status"], "reviewed");
    assert_eq!(outcome["swipe"]["reply_sent"], true);

    let left = json_request(
        "POST",
        "/api/v1/easy-reply/swipe",
        &json!({ "session_id": session_id, "comment_id": noise, "action": "swipe_left" }),
    );
    let res = expect_status(send(&app.app, left).await, StatusCode::OK).await;
    let outcome: Value = read_json(res).await;
    assert_eq!(outcome["comment_status"], "ignored");
    assert_eq!(outcome["swipe"]["reply_sent"], false);

    let res = expect_status(
        send(&app.app, get(&format!("/api/v1/comments/account/{}", ws))).await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    for item in page["items"].as_array().expect("items") {
        if item["id"] == question.as_str() {
            assert_eq!(item["status"], "reviewed");
            assert_eq!(item["is_replied_by_us"], true);
            assert_eq!(item["reviewed_by"], "user-1");
            assert!(item["replied_at"].is_string());
        } else {
            assert_eq!(item["status"], "ignored");
            assert_eq!(item["is_replied_by_us"], false);
            assert!(item["reply_content"].is_null());
        }
    }

    let end_uri = format!("/api/v1/easy-reply/session/{}/end", session_id);
    for _ in 0..2 {
        let end = json_request("PUT", &end_uri, &json!({}));
        let res = expect_status(send(&app.app, end).await, StatusCode::OK).await;
        let session: Value = read_json(res).await;
        assert_eq!(session["comments_reviewed"], 2);
        assert_eq!(session["comments_replied"], 1);
        assert!(session["session_ended_at"].is_string());
    }

    let late = json_request(
        "POST",
        "/api/v1/easy-reply/swipe",
        &json!({ "session_id": session_id, "comment_id": noise, "action": "swipe_up" }),
    );
    expect_status(send(&app.app, late).await, StatusCode::BAD_REQUEST).await;

    let res = expect_status(
        send(&app.app, get(&format!("/api/v1/easy-reply/stats/{}", ws))).await,
        StatusCode::OK,
    )
    .await;
    let summary: Value = read_json(res).await;
    assert_eq!(summary["period_days"], 30);
    assert_eq!(summary["global_stats"]["total_comments"], 2);
    assert_eq!(summary["global_stats"]["replied_comments"], 1);
    assert_eq!(summary["swipe_sessions"]["total_sessions"], 1);
    assert_eq!(summary["swipe_sessions"]["total_replies_sent"], 1);
}

#[tokio::test]
async fn reswiping_a_comment_overwrites_its_status() {
    let Some(app) = spawn_app().await else { return };
    let ws = unique_workspace("reswipe");
    let comments = seed_comments(&app, &ws).await;
    let question = id_of(&comments, "triage-0");
    let session_id = start_session(&app, &ws).await;

    for (action, expected) in [("swipe_left", "ignored"), ("swipe_up", "archived")] {
        let req = json_request(
            "POST",
            "/api/v1/easy-reply/swipe",
            &json!({ "session_id": session_id, "comment_id": question, "action": action }),
        );
        let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
        let outcome: Value = read_json(res).await;
        assert_eq!(outcome["comment_status"], expected);
    }
}

#[tokio::test]
async fn ignoring_a_replied_comment_clears_the_reply() {
    let Some(app) = spawn_app().await else { return };
    let ws = unique_workspace("undo");
    let comments = seed_comments(&app, &ws).await;
    let question = id_of(&comments, "triage-0");
    let session_id = start_session(&app, &ws).await;

    let right = json_request(
        "POST",
        "/api/v1/easy-reply/swipe",
        &json!({
            "session_id": session_id,
            "comment_id": question,
            "action": "swipe_right",
            "reply_content": "Slides are in the first comment."
        }),
    );
    expect_status(send(&app.app, right).await, StatusCode::OK).await;

    let left = json_request(
        "POST",
        "/api/v1/easy-reply/swipe",
        &json!({
            "session_id": session_id,
            "comment_id": question,
            "action": "swipe_left",
            "reply_content": "Draft I decided not to send"
        }),
    );
    let res = expect_status(send(&app.app, left).await, StatusCode::OK).await;
    let outcome: Value = read_json(res).await;
    assert_eq!(outcome["comment_status"], "ignored");
    assert_eq!(outcome["swipe"]["reply_sent"], false);
    assert_eq!(outcome["swipe"]["reply_content"], "Draft I decided not to send");

    let res = expect_status(
        send(&app.app, get(&format!("/api/v1/comments/account/{}", ws))).await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    let item = page["items"]
        .as_array()
        .expect("items")
        .iter()
        .find(|c| c["id"] == question.as_str())
        .expect("swiped comment missing");
    assert_eq!(item["status"], "ignored");
    assert_eq!(item["is_replied_by_us"], false);
    assert!(item["reply_content"].is_null());
    assert!(item["replied_at"].is_null());

    let swipes: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM easy_reply.comment_swipes WHERE comment_id = $1",
    )
    .bind(Uuid::parse_str(&question).expect("comment id"))
    .fetch_one(&app.db)
    .await
    .expect("count swipes");
    assert_eq!(swipes, 2);
}

#[tokio::test]
async fn malformed_session_id_is_a_json_bad_request() {
    let Some(app) = spawn_app().await else { return };
    let res = expect_status(
        send(&app.app, get("/api/v1/easy-reply/session/not-a-uuid")).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    let body: Value = read_json(res).await;
    assert!(body["error"].is_string());

    let end = json_request("PUT", "/api/v1/easy-reply/session/not-a-uuid/end", &json!({}));
    let res = expect_status(send(&app.app, end).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let Some(app) = spawn_app().await else { return };
    let uri = format!("/api/v1/easy-reply/session/{}", Uuid::now_v7());
    expect_status(send(&app.app, get(&uri)).await, StatusCode::NOT_FOUND).await;

    let end = json_request("PUT", &format!("{}/end", uri), &json!({}));
    expect_status(send(&app.app, end).await, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn suggest_reply_without_a_model_is_unavailable() {
    let Some(app) = spawn_app().await else { return };
    let ws = unique_workspace("suggest");
    let comments = seed_comments(&app, &ws).await;

    let req = json_request(
        "POST",
        "/api/v1/easy-reply/suggest-reply",
        &json!({ "comment_id": id_of(&comments, "triage-0"), "tone": "friendly" }),
    );
    expect_status(send(&app.app, req).await, StatusCode::SERVICE_UNAVAILABLE).await;
}
