//! Reply-worthiness scoring.
//!
//! The language model is asked first. Any failure on that path (transport,
//! missing key, non-JSON answer, missing fields) is logged and replaced by a
//! deterministic keyword heuristic, so [`CommentScorer::score`] never fails.

use super::prompt::{analysis_prompt, strip_json_fence};
use crate::{
    domain::comment::{analysis::CommentAnalysis, entity::Comment},
    infrastructure::llm::traits::{CompletionRequest, LanguageModel},
};
use serde::Deserialize;
use std::sync::Arc;

const SCORING_TEMPERATURE: f32 = 0.3;
const SCORING_MAX_TOKENS: u32 = 300;

const FALLBACK_BASE: i32 = 30;
const QUESTION_BONUS: i32 = 25;
const KEYWORD_BONUS: i32 = 20;
const LIKED_BONUS: i32 = 15;
const POPULAR_BONUS: i32 = 10;
const SHORT_PENALTY: i32 = 20;
const SHORT_COMMENT_CHARS: usize = 10;

/// Lowercase terms (English and French) that suggest a comment expects an answer.
const ENGAGEMENT_KEYWORDS: &[&str] = &[
    "comment",
    "pourquoi",
    "quand",
    "où",
    "help",
    "aide",
    "problème",
    "bug",
    "erreur",
    "support",
    "fonctionne",
    "ne marche pas",
    "how",
    "why",
    "when",
    "where",
    "issue",
    "error",
    "doesn't work",
    "not working",
    "problem",
    "question",
    "need help",
    "can you",
    "could you",
    "please",
    "thanks",
    "merci",
    "urgent",
    "important",
    "feedback",
    "avis",
    "suggestion",
    "réclamation",
    "demande",
    "request",
    "info",
    "information",
    "clarification",
    "détail",
    "explication",
    "explain",
    "details",
];

pub const FALLBACK_REASONING: &str = "Fallback heuristic analysis due to AI failure.";

#[derive(Debug, Deserialize)]
struct ModelAnalysis {
    score: f64,
    category: String,
    sentiment: String,
    priority: String,
    #[serde(default)]
    reasoning: String,
    suggested_tone: Option<String>,
}

/// Parses a model answer as strict JSON, clamping the score to 0..=100.
pub fn parse_analysis(raw: &str) -> anyhow::Result<CommentAnalysis> {
    let parsed: ModelAnalysis = serde_json::from_str(strip_json_fence(raw))?;
    if !parsed.score.is_finite() {
        anyhow::bail!("score is not a finite number");
    }
    Ok(CommentAnalysis {
        score: parsed.score.round().clamp(0.0, 100.0) as i32,
        category: parsed.category,
        sentiment: parsed.sentiment,
        priority: parsed.priority,
        reasoning: parsed.reasoning,
        suggested_tone: parsed.suggested_tone,
    })
}

pub fn fallback_score(content: &str, likes_count: i32) -> i32 {
    let mut score = FALLBACK_BASE;

    if content.contains('?') {
        score += QUESTION_BONUS;
    }

    let lowered = content.to_lowercase();
    if ENGAGEMENT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        score += KEYWORD_BONUS;
    }

    if likes_count > 5 {
        score += LIKED_BONUS;
    }
    if likes_count > 20 {
        score += POPULAR_BONUS;
    }

    if content.chars().count() < SHORT_COMMENT_CHARS {
        score -= SHORT_PENALTY;
    }

    score.clamp(0, 100)
}

pub fn fallback_analysis(content: &str, likes_count: i32) -> CommentAnalysis {
    CommentAnalysis {
        score: fallback_score(content, likes_count),
        category: "other".into(),
        sentiment: "neutral".into(),
        priority: "medium".into(),
        reasoning: FALLBACK_REASONING.into(),
        suggested_tone: Some("professional".into()),
    }
}

pub struct CommentScorer {
    model: Arc<dyn LanguageModel>,
}

impl CommentScorer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> String {
        self.model.model_name()
    }

    pub async fn score(&self, comment: &Comment) -> CommentAnalysis {
        let request = CompletionRequest {
            prompt: analysis_prompt(comment),
            temperature: SCORING_TEMPERATURE,
            max_tokens: SCORING_MAX_TOKENS,
        };

        let result = match self.model.complete(request).await {
            Ok(raw) => parse_analysis(&raw),
            Err(e) => Err(e),
        };

        match result {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(
                    comment_id = %comment.id,
                    error = %e,
                    "AI analysis failed, using heuristic score"
                );
                fallback_analysis(&comment.content, comment.likes_count)
            }
        }
    }
}
