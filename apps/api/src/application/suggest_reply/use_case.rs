use super::dto::{SuggestReplyRequest, SuggestReplyResponse};
use crate::{
    application::analysis::prompt::{reply_prompt, strip_json_fence},
    domain::{
        comment::{analysis::SuggestedReply, repository::CommentRepository},
        shared::errors::DomainError,
    },
    infrastructure::llm::traits::{CompletionRequest, LanguageModel},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

const REPLY_TEMPERATURE: f32 = 0.7;
const REPLY_MAX_TOKENS: u32 = 400;
const DEFAULT_CONFIDENCE: f64 = 0.5;
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
struct ModelReply {
    suggested_reply: String,
    confidence_score: Option<f64>,
    #[serde(default)]
    alternative_replies: Vec<String>,
}

fn parse_reply(raw: &str) -> anyhow::Result<ModelReply> {
    let reply: ModelReply = serde_json::from_str(strip_json_fence(raw))?;
    if reply.suggested_reply.trim().is_empty() {
        anyhow::bail!("empty suggested_reply");
    }
    Ok(reply)
}

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Drafts a reply with the language model and keeps it for later review.
///
/// There is no heuristic fallback here: a model failure is reported as
/// [`DomainError::ExternalService`].
pub struct SuggestReplyUseCase {
    repository: Arc<dyn CommentRepository>,
    model: Arc<dyn LanguageModel>,
}

impl SuggestReplyUseCase {
    pub fn new(repository: Arc<dyn CommentRepository>, model: Arc<dyn LanguageModel>) -> Self {
        Self { repository, model }
    }

    #[instrument(skip(self, request), fields(comment_id = %request.comment_id, tone = request.tone.as_str()))]
    pub async fn suggest(
        &self,
        request: SuggestReplyRequest,
    ) -> Result<SuggestReplyResponse, DomainError> {
        request.validate()?;
        let comment = self
            .repository
            .find_by_id(request.comment_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment {}", request.comment_id)))?;

        let completion = CompletionRequest {
            prompt: reply_prompt(&comment, request.tone, request.context.as_deref()),
            temperature: REPLY_TEMPERATURE,
            max_tokens: REPLY_MAX_TOKENS,
        };
        let parsed = match self.model.complete(completion).await {
            Ok(raw) => parse_reply(&raw),
            Err(e) => Err(e),
        }
        .map_err(|e| {
            warn!(error = %e, "Reply suggestion failed");
            DomainError::ExternalService(format!("reply suggestion failed: {}", e))
        })?;

        let suggestion = SuggestedReply {
            id: Uuid::now_v7(),
            comment_id: comment.id,
            suggested_reply: parsed.suggested_reply,
            tone: request.tone,
            confidence_score: parsed
                .confidence_score
                .filter(|c| c.is_finite())
                .map_or(DEFAULT_CONFIDENCE, |c| c.clamp(0.0, 1.0)),
            alternative_replies: parsed.alternative_replies,
        };
        self.repository.save_suggested_reply(&suggestion).await?;
        info!(suggestion_id = %suggestion.id, "Saved reply suggestion");

        Ok(SuggestReplyResponse {
            id: suggestion.id,
            comment_id: suggestion.comment_id,
            suggested_reply: suggestion.suggested_reply,
            confidence_score: suggestion.confidence_score,
            alternative_replies: suggestion.alternative_replies,
            tone: suggestion.tone,
            comment_preview: preview(&comment.content),
        })
    }
}
