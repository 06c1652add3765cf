use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub const ANALYSIS_VERSION: &str = "1.0";

/// Reply-worthiness assessment of a single comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommentAnalysis {
    /// Always within 0..=100.
    pub score: i32,
    pub category: String,
    pub sentiment: String,
    pub priority: String,
    pub reasoning: String,
    pub suggested_tone: Option<String>,
}

impl CommentAnalysis {
    pub fn metadata(&self, model: &str) -> serde_json::Value {
        serde_json::json!({
            "reasoning": self.reasoning,
            "suggested_tone": self.suggested_tone,
            "ai_model": model,
            "analysis_version": ANALYSIS_VERSION,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReplyTone {
    #[default]
    Professional,
    Friendly,
    Formal,
    Casual,
}

impl ReplyTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Friendly => "friendly",
            Self::Formal => "formal",
            Self::Casual => "casual",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuggestedReply {
    pub id: Uuid,
    pub comment_id: Uuid,
    pub suggested_reply: String,
    pub tone: ReplyTone,
    pub confidence_score: f64,
    pub alternative_replies: Vec<String>,
}
