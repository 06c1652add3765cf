use crate::domain::{comment::entity::CommentStatus, shared::errors::DomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;

/// A triage gesture on a comment card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SwipeAction {
    /// Worth a reply.
    SwipeRight,
    /// Ignore.
    SwipeLeft,
    /// Archive.
    SwipeUp,
}

impl SwipeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SwipeRight => "swipe_right",
            Self::SwipeLeft => "swipe_left",
            Self::SwipeUp => "swipe_up",
        }
    }

    /// Status the swiped comment ends up in, whatever its previous status.
    pub fn resulting_status(&self) -> CommentStatus {
        match self {
            Self::SwipeRight => CommentStatus::Reviewed,
            Self::SwipeLeft => CommentStatus::Ignored,
            Self::SwipeUp => CommentStatus::Archived,
        }
    }

    /// A reply is only sent on a right swipe carrying non-empty reply text.
    pub fn sends_reply(&self, reply_content: Option<&str>) -> bool {
        matches!(self, Self::SwipeRight) && reply_content.is_some_and(|c| !c.is_empty())
    }
}

impl fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwipeAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swipe_right" => Ok(Self::SwipeRight),
            "swipe_left" => Ok(Self::SwipeLeft),
            "swipe_up" => Ok(Self::SwipeUp),
            other => Err(DomainError::ValidationError(format!(
                "unknown swipe action '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for SwipeAction {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One user's triage run. Counters stay at zero until the session is ended.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct SwipeSession {
    pub id: Uuid,
    pub workspace_id: String,
    pub channel_id: Option<String>,
    pub user_id: String,
    pub session_started_at: DateTime<Utc>,
    pub session_ended_at: Option<DateTime<Utc>>,
    pub comments_reviewed: i32,
    pub comments_replied: i32,
    pub session_metadata: serde_json::Value,
}

impl SwipeSession {
    pub fn is_ended(&self) -> bool {
        self.session_ended_at.is_some()
    }
}

/// Append-only record of a single swipe.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct CommentSwipe {
    pub id: Uuid,
    pub session_id: Uuid,
    pub comment_id: Uuid,
    #[sqlx(try_from = "String")]
    pub action: SwipeAction,
    pub reply_sent: bool,
    pub reply_content: Option<String>,
    pub swiped_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub workspace_id: String,
    pub channel_id: Option<String>,
    pub user_id: String,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct SwipeCommand {
    pub session_id: Uuid,
    pub comment_id: Uuid,
    pub action: SwipeAction,
    pub reply_content: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SwipeOutcome {
    pub swipe: CommentSwipe,
    pub comment_status: CommentStatus,
}

#[derive(Debug, Clone, Default, Serialize, sqlx::FromRow)]
pub struct CommentTotals {
    pub total_comments: i64,
    pub analyzed_comments: i64,
    pub replied_comments: i64,
    pub avg_ai_score: Option<f64>,
    pub high_priority_comments: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryBreakdown {
    pub ai_category: String,
    pub count: i64,
    pub replied_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, sqlx::FromRow)]
pub struct SessionTotals {
    pub total_sessions: i64,
    pub avg_comments_per_session: Option<f64>,
    pub avg_replies_per_session: Option<f64>,
    pub total_replies_sent: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivitySummary {
    pub period_days: i64,
    pub global_stats: CommentTotals,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub swipe_sessions: SessionTotals,
    pub generated_at: DateTime<Utc>,
}
