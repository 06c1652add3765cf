use crate::domain::shared::{errors::DomainError, pagination::PaginationRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

/// Triage state of a comment. Only swipe actions move a comment between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CommentStatus {
    #[default]
    Pending,
    Reviewed,
    Archived,
    Ignored,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Archived => "archived",
            Self::Ignored => "ignored",
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "reviewed" => Ok(Self::Reviewed),
            "archived" => Ok(Self::Archived),
            "ignored" => Ok(Self::Ignored),
            other => Err(DomainError::ValidationError(format!(
                "unknown comment status '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for CommentStatus {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A comment collected from a social network, with its AI analysis and triage state.
///
/// `(platform_comment_id, platform, channel_id)` is unique; re-ingesting the same
/// comment only refreshes content and engagement counters.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub workspace_id: String,
    pub channel_id: String,
    pub platform: String,
    pub platform_comment_id: String,
    pub content: String,
    pub author_name: Option<String>,
    pub author_id: Option<String>,
    pub author_avatar_url: Option<String>,
    pub likes_count: i32,
    pub replies_count: i32,
    pub commented_at: Option<DateTime<Utc>>,
    pub post_id: String,
    pub post_content: Option<String>,
    pub post_url: Option<String>,
    pub post_created_at: Option<DateTime<Utc>>,
    pub has_official_reply: bool,
    pub is_replied_by_us: bool,
    pub reply_content: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub ai_score: Option<i32>,
    pub ai_category: Option<String>,
    pub ai_sentiment: Option<String>,
    pub ai_priority: Option<String>,
    pub ai_metadata: Option<serde_json::Value>,
    pub ai_analyzed_at: Option<DateTime<Utc>>,
    #[sqlx(try_from = "String")]
    pub status: CommentStatus,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ingestion payload for a single comment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewComment {
    #[validate(length(min = 1, max = 128))]
    pub workspace_id: String,
    #[validate(length(min = 1, max = 128))]
    pub channel_id: String,
    #[validate(length(min = 1, max = 32))]
    pub platform: String,
    #[validate(length(min = 1, max = 255))]
    pub platform_comment_id: String,
    pub content: String,
    pub author_name: Option<String>,
    pub author_id: Option<String>,
    pub author_avatar_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub likes_count: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub replies_count: i32,
    pub commented_at: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 255))]
    pub post_id: String,
    pub post_content: Option<String>,
    pub post_url: Option<String>,
    pub post_created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_official_reply: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentSortBy {
    #[default]
    CreatedAt,
    Likes,
    AiScore,
}

impl CommentSortBy {
    pub fn order_clause(&self) -> &'static str {
        match self {
            Self::AiScore => "ai_score DESC NULLS LAST, id DESC",
            Self::Likes => "likes_count DESC, id DESC",
            Self::CreatedAt => "commented_at DESC NULLS LAST, id DESC",
        }
    }
}

/// Row predicate shared by the page query and its total count.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub workspace_id: String,
    pub post_id: Option<String>,
    pub channel_id: Option<String>,
    pub platform: Option<String>,
    pub is_replied: Option<bool>,
    pub commented_from: Option<DateTime<Utc>>,
    pub commented_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct CommentQuery {
    pub filter: CommentFilter,
    pub sort_by: CommentSortBy,
    pub page: PaginationRequest,
}

#[derive(Debug, Clone, Default)]
pub struct ReplyStatusUpdate {
    pub is_replied_by_us: bool,
    pub reply_content: Option<String>,
    /// Stored as the current time when absent.
    pub replied_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisSelection {
    pub workspace_id: String,
    pub channel_id: Option<String>,
    pub post_id: Option<String>,
    pub force_reanalysis: bool,
}

pub const ANALYSIS_BATCH_LIMIT: i64 = 100;

#[derive(Debug, Clone)]
pub struct SwipeQueueQuery {
    pub workspace_id: String,
    pub channel_id: Option<String>,
    pub limit: i64,
    pub min_score: i32,
    pub exclude_replied: bool,
}

impl SwipeQueueQuery {
    pub fn new(workspace_id: String) -> Self {
        Self {
            workspace_id,
            channel_id: None,
            limit: 20,
            min_score: 50,
            exclude_replied: true,
        }
    }
}

#[cfg(test)]
impl Comment {
    pub(crate) fn fixture(content: &str, likes_count: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            workspace_id: "ws-1".into(),
            channel_id: "ch-1".into(),
            platform: "linkedin".into(),
            platform_comment_id: "urn:li:comment:1".into(),
            content: content.into(),
            author_name: Some("Ada".into()),
            author_id: None,
            author_avatar_url: None,
            likes_count,
            replies_count: 0,
            commented_at: Some(now),
            post_id: "post-1".into(),
            post_content: Some("Launching our new product today".into()),
            post_url: None,
            post_created_at: None,
            has_official_reply: false,
            is_replied_by_us: false,
            reply_content: None,
            replied_at: None,
            ai_score: None,
            ai_category: None,
            ai_sentiment: None,
            ai_priority: None,
            ai_metadata: None,
            ai_analyzed_at: None,
            status: CommentStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
