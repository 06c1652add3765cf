use super::{
    dto::{AnalyzeCommentsRequest, AnalyzeCommentsResponse},
    scorer::CommentScorer,
};
use crate::domain::{
    comment::{
        entity::{AnalysisSelection, Comment},
        repository::CommentRepository,
    },
    shared::errors::DomainError,
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

pub struct AnalyzeCommentsUseCase {
    repository: Arc<dyn CommentRepository>,
    scorer: CommentScorer,
}

impl AnalyzeCommentsUseCase {
    pub fn new(repository: Arc<dyn CommentRepository>, scorer: CommentScorer) -> Self {
        Self { repository, scorer }
    }

    /// Scores every comment, then persists all analyses in one transaction.
    ///
    /// Scoring cannot fail (the heuristic takes over), so the only error
    /// source is storage, and a storage error leaves no analysis written.
    #[instrument(skip(self, comments), fields(count = comments.len()))]
    pub async fn analyze_and_save(&self, comments: &[Comment]) -> Result<usize, DomainError> {
        if comments.is_empty() {
            return Ok(0);
        }

        let mut results = Vec::with_capacity(comments.len());
        for comment in comments {
            let analysis = self.scorer.score(comment).await;
            results.push((comment.id, analysis));
        }

        self.repository
            .save_analyses(&results, &self.scorer.model_name())
            .await?;

        info!(analyzed = results.len(), "Saved comment analyses");
        Ok(results.len())
    }

    #[instrument(skip(self, request))]
    pub async fn analyze_workspace(
        &self,
        workspace_id: &str,
        request: AnalyzeCommentsRequest,
    ) -> Result<AnalyzeCommentsResponse, DomainError> {
        request.validate()?;
        let selection = AnalysisSelection {
            workspace_id: workspace_id.to_string(),
            channel_id: request.channel_id,
            post_id: request.post_id,
            force_reanalysis: request.force_reanalysis,
        };
        let comments = self.repository.find_for_analysis(&selection).await?;
        let analyzed_count = self.analyze_and_save(&comments).await?;

        Ok(AnalyzeCommentsResponse {
            workspace_id: workspace_id.to_string(),
            analyzed_count,
            model: self.scorer.model_name(),
        })
    }
}
