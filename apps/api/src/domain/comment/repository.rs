use super::{
    analysis::{CommentAnalysis, SuggestedReply},
    entity::{AnalysisSelection, Comment, CommentQuery, NewComment, ReplyStatusUpdate, SwipeQueueQuery},
};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Upserts the batch in one transaction; returns the number of rows written.
    async fn save_comments(&self, comments: &[NewComment]) -> Result<u64, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError>;
    /// Returns one page of matching comments and the unpaginated total.
    async fn find_comments(&self, query: &CommentQuery) -> Result<(Vec<Comment>, i64), DomainError>;
    async fn update_reply_status(
        &self,
        id: Uuid,
        update: &ReplyStatusUpdate,
    ) -> Result<(), DomainError>;
    async fn find_for_analysis(
        &self,
        selection: &AnalysisSelection,
    ) -> Result<Vec<Comment>, DomainError>;
    /// Writes every analysis or none of them.
    async fn save_analyses(
        &self,
        results: &[(Uuid, CommentAnalysis)],
        model: &str,
    ) -> Result<(), DomainError>;
    async fn find_swipe_candidates(
        &self,
        query: &SwipeQueueQuery,
    ) -> Result<Vec<Comment>, DomainError>;
    async fn save_suggested_reply(&self, reply: &SuggestedReply) -> Result<(), DomainError>;
}
