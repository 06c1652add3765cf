use crate::domain::comment::analysis::ReplyTone;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct SuggestReplyRequest {
    pub comment_id: Uuid,
    #[serde(default)]
    pub tone: ReplyTone,
    #[validate(length(max = 1000))]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SuggestReplyResponse {
    pub id: Uuid,
    pub comment_id: Uuid,
    pub suggested_reply: String,
    pub confidence_score: f64,
    pub alternative_replies: Vec<String>,
    pub tone: ReplyTone,
    pub comment_preview: String,
}
