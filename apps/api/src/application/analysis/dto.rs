use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct AnalyzeCommentsRequest {
    #[validate(length(min = 1, max = 128))]
    pub channel_id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub post_id: Option<String>,
    #[serde(default)]
    pub force_reanalysis: bool,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct AnalyzeCommentsResponse {
    pub workspace_id: String,
    pub analyzed_count: usize,
    pub model: String,
}
