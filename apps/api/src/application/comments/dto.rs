use crate::domain::comment::entity::{CommentSortBy, NewComment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

fn default_limit() -> i64 {
    50
}

fn default_swipe_limit() -> i64 {
    20
}

fn default_min_score() -> i32 {
    50
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngestCommentsRequest {
    #[validate(length(min = 1, max = 500), nested)]
    pub comments: Vec<NewComment>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct IngestCommentsResponse {
    pub saved: u64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostCommentsQuery {
    pub platform: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 200))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,
    #[serde(default)]
    pub sort_by: CommentSortBy,
    pub filter_replied: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AccountCommentsQuery {
    pub channel_id: Option<String>,
    pub platform: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 200))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,
    #[serde(default)]
    pub sort_by: CommentSortBy,
    pub filter_replied: Option<bool>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SwipeQueueParams {
    pub channel_id: Option<String>,
    #[serde(default = "default_swipe_limit")]
    #[validate(range(min = 1, max = 50))]
    pub limit: i64,
    #[serde(default = "default_min_score")]
    #[validate(range(min = 0, max = 100))]
    pub min_score: i32,
    #[serde(default = "default_true")]
    pub exclude_replied: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct ReplyStatusRequest {
    pub is_replied_by_us: bool,
    #[validate(length(max = 5000))]
    pub reply_content: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
}
