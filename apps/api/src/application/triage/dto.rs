use crate::domain::triage::entity::SwipeAction;
use serde::Deserialize;
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

fn default_period_days() -> i64 {
    30
}

#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct StartSessionRequest {
    #[validate(length(min = 1, max = 128))]
    pub workspace_id: String,
    #[validate(length(min = 1, max = 128))]
    pub channel_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct RecordSwipeRequest {
    pub session_id: Uuid,
    pub comment_id: Uuid,
    pub action: SwipeAction,
    #[validate(length(max = 5000))]
    pub reply_content: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActivitySummaryParams {
    #[serde(default = "default_period_days")]
    #[validate(range(min = 1, max = 365))]
    pub period_days: i64,
}
