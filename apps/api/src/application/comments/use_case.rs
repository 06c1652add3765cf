use super::dto::{
    AccountCommentsQuery, IngestCommentsRequest, IngestCommentsResponse, PostCommentsQuery,
    ReplyStatusRequest, SwipeQueueParams,
};
use crate::domain::{
    comment::{
        entity::{Comment, CommentFilter, CommentQuery, ReplyStatusUpdate, SwipeQueueQuery},
        repository::CommentRepository,
    },
    shared::{
        errors::DomainError,
        pagination::{PaginatedResponse, PaginationRequest},
    },
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

pub struct CommentsUseCase {
    repository: Arc<dyn CommentRepository>,
}

impl CommentsUseCase {
    pub fn new(repository: Arc<dyn CommentRepository>) -> Self {
        Self { repository }
    }

    /// Upserts a batch of comments for one workspace.
    ///
    /// Every comment must belong to `workspace_id`; the batch is rejected
    /// before touching storage otherwise.
    #[instrument(skip(self, request), fields(count = request.comments.len()))]
    pub async fn ingest(
        &self,
        workspace_id: &str,
        request: IngestCommentsRequest,
    ) -> Result<IngestCommentsResponse, DomainError> {
        request.validate()?;
        if let Some(stray) = request
            .comments
            .iter()
            .find(|c| c.workspace_id != workspace_id)
        {
            return Err(DomainError::ValidationError(format!(
                "comment {} belongs to workspace {}",
                stray.platform_comment_id, stray.workspace_id
            )));
        }

        let saved = self.repository.save_comments(&request.comments).await?;
        info!(saved, "Ingested comments");
        Ok(IngestCommentsResponse { saved })
    }

    pub async fn post_comments(
        &self,
        workspace_id: &str,
        post_id: &str,
        params: PostCommentsQuery,
    ) -> Result<PaginatedResponse<Comment>, DomainError> {
        params.validate()?;
        let query = CommentQuery {
            filter: CommentFilter {
                workspace_id: workspace_id.to_string(),
                post_id: Some(post_id.to_string()),
                platform: params.platform,
                is_replied: params.filter_replied,
                ..Default::default()
            },
            sort_by: params.sort_by,
            page: PaginationRequest::new(Some(params.limit), Some(params.offset)),
        };
        self.page(query).await
    }

    pub async fn account_comments(
        &self,
        workspace_id: &str,
        params: AccountCommentsQuery,
    ) -> Result<PaginatedResponse<Comment>, DomainError> {
        params.validate()?;
        if let (Some(from), Some(to)) = (params.date_from, params.date_to) {
            if from > to {
                return Err(DomainError::ValidationError(
                    "date_from must not be after date_to".into(),
                ));
            }
        }
        let query = CommentQuery {
            filter: CommentFilter {
                workspace_id: workspace_id.to_string(),
                post_id: None,
                channel_id: params.channel_id,
                platform: params.platform,
                is_replied: params.filter_replied,
                commented_from: params.date_from,
                commented_to: params.date_to,
            },
            sort_by: params.sort_by,
            page: PaginationRequest::new(Some(params.limit), Some(params.offset)),
        };
        self.page(query).await
    }

    async fn page(&self, query: CommentQuery) -> Result<PaginatedResponse<Comment>, DomainError> {
        let (items, total) = self.repository.find_comments(&query).await?;
        Ok(PaginatedResponse::new(items, total, query.page))
    }

    #[instrument(skip(self, request))]
    pub async fn update_reply_status(
        &self,
        comment_id: Uuid,
        request: ReplyStatusRequest,
    ) -> Result<(), DomainError> {
        request.validate()?;
        let update = ReplyStatusUpdate {
            is_replied_by_us: request.is_replied_by_us,
            reply_content: request.reply_content,
            replied_at: request.replied_at,
        };
        self.repository.update_reply_status(comment_id, &update).await
    }

    pub async fn swipe_queue(
        &self,
        workspace_id: &str,
        params: SwipeQueueParams,
    ) -> Result<Vec<Comment>, DomainError> {
        params.validate()?;
        let query = SwipeQueueQuery {
            channel_id: params.channel_id,
            limit: params.limit,
            min_score: params.min_score,
            exclude_replied: params.exclude_replied,
            ..SwipeQueueQuery::new(workspace_id.to_string())
        };
        self.repository.find_swipe_candidates(&query).await
    }
}
