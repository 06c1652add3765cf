use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A text-completion model. Callers decide what a failure means for them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a single-turn prompt and return the raw text of the first choice.
    async fn complete(&self, request: CompletionRequest) -> anyhow::Result<String>;

    /// Model identifier recorded alongside results produced by this model.
    fn model_name(&self) -> String;
}
