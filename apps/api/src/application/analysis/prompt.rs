use crate::domain::comment::{analysis::ReplyTone, entity::Comment};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LATIN_LETTER: Regex = Regex::new(r"[a-zA-Z]").unwrap();
    static ref FRENCH_ACCENT: Regex = Regex::new(r"(?i)[àâçéèêëîïôûùüÿñæœ]").unwrap();
    static ref JSON_FENCE: Regex = Regex::new(r"(?s)^```(?:json)?\s*(.*?)\s*```$").unwrap();
}

const POST_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptLanguage {
    English,
    French,
}

impl PromptLanguage {
    /// English unless the text has no Latin letters or carries French accents.
    pub fn detect(text: &str) -> Self {
        if LATIN_LETTER.is_match(text) && !FRENCH_ACCENT.is_match(text) {
            Self::English
        } else {
            Self::French
        }
    }
}

fn comment_context(comment: &Comment) -> String {
    let post = comment
        .post_content
        .as_deref()
        .map(|p| p.chars().take(POST_EXCERPT_CHARS).collect::<String>())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Post: \"{}\"\nComment: \"{}\"\nAuthor: {}\nPlatform: {}\nLikes: {}",
        post,
        comment.content,
        comment.author_name.as_deref().unwrap_or("Anonymous"),
        comment.platform,
        comment.likes_count
    )
}

pub fn analysis_prompt(comment: &Comment) -> String {
    let context = comment_context(comment);
    match PromptLanguage::detect(&comment.content) {
        PromptLanguage::English => format!(
            r#"Analyze the following comment and return ONLY a valid JSON with this structure:
{{
  "score": 85,
  "category": "question",
  "sentiment": "positive",
  "priority": "high",
  "reasoning": "Short explanation of the analysis",
  "suggested_tone": "professional"
}}

RULES:
- score: 0-100 (relevance for replying)
- category: "question", "constructive_criticism", "compliment", "spam", "promotion", "other"
- sentiment: "positive", "negative", "neutral"
- priority: "high", "medium", "low"
- suggested_tone: "professional", "friendly", "formal", "casual"

{context}
Return ONLY the JSON."#
        ),
        PromptLanguage::French => format!(
            r#"Analyse le commentaire suivant et retourne UNIQUEMENT un JSON valide avec cette structure :
{{
  "score": 85,
  "category": "question",
  "sentiment": "positive",
  "priority": "high",
  "reasoning": "Explication courte de l'analyse",
  "suggested_tone": "professional"
}}

RÈGLES :
- score : 0-100 (pertinence pour répondre)
- category : "question", "critique_constructive", "compliment", "spam", "promotion", "autre"
- sentiment : "positive", "negative", "neutral"
- priority : "high", "medium", "low"
- suggested_tone : "professional", "friendly", "formal", "casual"

{context}
Retourne UNIQUEMENT le JSON."#
        ),
    }
}

pub fn reply_prompt(comment: &Comment, tone: ReplyTone, extra_context: Option<&str>) -> String {
    let tone = tone.as_str();
    let extra = extra_context
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!("Additional context: {}\n", c))
        .unwrap_or_default();

    format!(
        r#"Write a {tone} reply to this comment. Return ONLY a JSON with this structure:

{{
  "suggested_reply": "Your reply here",
  "confidence_score": 0.85,
  "alternative_replies": ["Alternative 1", "Alternative 2"]
}}

CONTEXT:
Original post: "{post}"
Comment: "{content}"
Author: {author}
Platform: {platform}
Requested tone: {tone}
{extra}
RULES:
- Be {tone} but authentic
- At most 280 characters for LinkedIn/Twitter
- Answer the comment directly
- Be helpful and engaging
- Do not invent information
- Reply in the language of the comment

Return ONLY the JSON, nothing else."#,
        post = comment.post_content.as_deref().unwrap_or("N/A"),
        content = comment.content,
        author = comment.author_name.as_deref().unwrap_or("User"),
        platform = comment.platform,
    )
}

/// Strips a Markdown code fence some models wrap around JSON answers.
pub fn strip_json_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    JSON_FENCE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map_or(trimmed, |m| m.as_str())
}
