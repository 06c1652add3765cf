use crate::domain::{
    comment::{
        analysis::{CommentAnalysis, SuggestedReply},
        entity::{
            ANALYSIS_BATCH_LIMIT, AnalysisSelection, Comment, CommentFilter, CommentQuery,
            CommentStatus, NewComment, ReplyStatusUpdate, SwipeQueueQuery,
        },
        repository::CommentRepository,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, workspace_id, channel_id, platform, platform_comment_id, \
     content, author_name, author_id, author_avatar_url, likes_count, replies_count, \
     commented_at, post_id, post_content, post_url, post_created_at, has_official_reply, \
     is_replied_by_us, reply_content, replied_at, ai_score, ai_category, ai_sentiment, \
     ai_priority, ai_metadata, ai_analyzed_at, status, reviewed_by, reviewed_at, \
     created_at, updated_at";

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &CommentFilter) {
    builder
        .push(" WHERE workspace_id = ")
        .push_bind(filter.workspace_id.clone());

    if let Some(post_id) = &filter.post_id {
        builder.push(" AND post_id = ").push_bind(post_id.clone());
    }
    if let Some(channel_id) = &filter.channel_id {
        builder.push(" AND channel_id = ").push_bind(channel_id.clone());
    }
    if let Some(platform) = &filter.platform {
        builder.push(" AND platform = ").push_bind(platform.clone());
    }
    if let Some(is_replied) = filter.is_replied {
        builder.push(" AND is_replied_by_us = ").push_bind(is_replied);
    }
    if let Some(from) = filter.commented_from {
        builder.push(" AND commented_at >= ").push_bind(from);
    }
    if let Some(to) = filter.commented_to {
        builder.push(" AND commented_at <= ").push_bind(to);
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn save_comments(&self, comments: &[NewComment]) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for comment in comments {
            let result = sqlx::query(
                r#"INSERT INTO easy_reply.comments (
                    id, workspace_id, channel_id, platform, platform_comment_id, content,
                    author_name, author_id, author_avatar_url, likes_count, replies_count,
                    commented_at, post_id, post_content, post_url, post_created_at,
                    has_official_reply
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                ON CONFLICT (platform_comment_id, platform, channel_id) DO UPDATE SET
                    content = EXCLUDED.content,
                    author_name = EXCLUDED.author_name,
                    author_avatar_url = EXCLUDED.author_avatar_url,
                    likes_count = EXCLUDED.likes_count,
                    replies_count = EXCLUDED.replies_count,
                    post_content = EXCLUDED.post_content,
                    has_official_reply = EXCLUDED.has_official_reply,
                    updated_at = NOW()
                WHERE easy_reply.comments.workspace_id = EXCLUDED.workspace_id"#,
            )
            .bind(Uuid::now_v7())
            .bind(&comment.workspace_id)
            .bind(&comment.channel_id)
            .bind(&comment.platform)
            .bind(&comment.platform_comment_id)
            .bind(&comment.content)
            .bind(&comment.author_name)
            .bind(&comment.author_id)
            .bind(&comment.author_avatar_url)
            .bind(comment.likes_count)
            .bind(comment.replies_count)
            .bind(comment.commented_at)
            .bind(&comment.post_id)
            .bind(&comment.post_content)
            .bind(&comment.post_url)
            .bind(comment.post_created_at)
            .bind(comment.has_official_reply)
            .execute(&mut *tx)
            .await?;

            // Zero rows means the identity is owned by another workspace; dropping
            // `tx` rolls back the rows already written.
            if result.rows_affected() == 0 {
                return Err(DomainError::ValidationError(format!(
                    "comment {} on {} channel {} belongs to another workspace",
                    comment.platform_comment_id, comment.platform, comment.channel_id
                )));
            }
            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM easy_reply.comments WHERE id = $1",
            COMMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn find_comments(&self, query: &CommentQuery) -> Result<(Vec<Comment>, i64), DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM easy_reply.comments",
            COMMENT_COLUMNS
        ));
        push_filter(&mut builder, &query.filter);
        builder
            .push(" ORDER BY ")
            .push(query.sort_by.order_clause())
            .push(" LIMIT ")
            .push_bind(query.page.limit)
            .push(" OFFSET ")
            .push_bind(query.page.offset);

        let items = builder
            .build_query_as::<Comment>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM easy_reply.comments");
        push_filter(&mut count, &query.filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn update_reply_status(
        &self,
        id: Uuid,
        update: &ReplyStatusUpdate,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"UPDATE easy_reply.comments SET
                is_replied_by_us = $1,
                reply_content = $2,
                replied_at = COALESCE($3, NOW()),
                updated_at = NOW()
            WHERE id = $4"#,
        )
        .bind(update.is_replied_by_us)
        .bind(&update.reply_content)
        .bind(update.replied_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("comment {}", id)));
        }
        Ok(())
    }

    async fn find_for_analysis(
        &self,
        selection: &AnalysisSelection,
    ) -> Result<Vec<Comment>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM easy_reply.comments WHERE workspace_id = ",
            COMMENT_COLUMNS
        ));
        builder.push_bind(selection.workspace_id.clone());
        if let Some(channel_id) = &selection.channel_id {
            builder.push(" AND channel_id = ").push_bind(channel_id.clone());
        }
        if let Some(post_id) = &selection.post_id {
            builder.push(" AND post_id = ").push_bind(post_id.clone());
        }
        if !selection.force_reanalysis {
            builder.push(" AND ai_analyzed_at IS NULL");
        }
        builder
            .push(" ORDER BY commented_at DESC NULLS LAST LIMIT ")
            .push_bind(ANALYSIS_BATCH_LIMIT);

        let comments = builder
            .build_query_as::<Comment>()
            .fetch_all(&self.pool)
            .await?;
        Ok(comments)
    }

    async fn save_analyses(
        &self,
        results: &[(Uuid, CommentAnalysis)],
        model: &str,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await?;

        for (id, analysis) in results {
            let result = sqlx::query(
                r#"UPDATE easy_reply.comments SET
                    ai_score = $1,
                    ai_category = $2,
                    ai_sentiment = $3,
                    ai_priority = $4,
                    ai_metadata = $5,
                    ai_analyzed_at = NOW(),
                    updated_at = NOW()
                WHERE id = $6"#,
            )
            .bind(analysis.score)
            .bind(&analysis.category)
            .bind(&analysis.sentiment)
            .bind(&analysis.priority)
            .bind(analysis.metadata(model))
            .bind(id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(DomainError::NotFound(format!("comment {}", id)));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_swipe_candidates(
        &self,
        query: &SwipeQueueQuery,
    ) -> Result<Vec<Comment>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM easy_reply.comments WHERE workspace_id = ",
            COMMENT_COLUMNS
        ));
        builder
            .push_bind(query.workspace_id.clone())
            .push(" AND ai_score >= ")
            .push_bind(query.min_score)
            .push(" AND status = ")
            .push_bind(CommentStatus::Pending.as_str());
        if let Some(channel_id) = &query.channel_id {
            builder.push(" AND channel_id = ").push_bind(channel_id.clone());
        }
        if query.exclude_replied {
            builder.push(" AND is_replied_by_us = FALSE");
        }
        builder
            .push(" ORDER BY ai_score DESC, commented_at DESC NULLS LAST LIMIT ")
            .push_bind(query.limit);

        let comments = builder
            .build_query_as::<Comment>()
            .fetch_all(&self.pool)
            .await?;
        Ok(comments)
    }

    async fn save_suggested_reply(&self, reply: &SuggestedReply) -> Result<(), DomainError> {
        sqlx::query(
            r#"INSERT INTO easy_reply.ai_suggested_replies (
                id, comment_id, suggested_reply, tone, confidence_score, alternative_replies
            ) VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(reply.id)
        .bind(reply.comment_id)
        .bind(&reply.suggested_reply)
        .bind(reply.tone.as_str())
        .bind(reply.confidence_score)
        .bind(sqlx::types::Json(&reply.alternative_replies))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
