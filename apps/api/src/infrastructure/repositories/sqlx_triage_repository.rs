use crate::domain::{
    shared::errors::DomainError,
    triage::{
        entity::{
            CategoryBreakdown, CommentSwipe, CommentTotals, NewSession, SessionTotals,
            SwipeCommand, SwipeOutcome, SwipeSession,
        },
        repository::TriageRepository,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const SESSION_COLUMNS: &str = "id, workspace_id, channel_id, user_id, session_started_at, \
     session_ended_at, comments_reviewed, comments_replied, session_metadata";

pub struct SqlxTriageRepository {
    pub pool: PgPool,
}

impl SqlxTriageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionGate {
    user_id: String,
    session_ended_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl TriageRepository for SqlxTriageRepository {
    async fn start_session(&self, session: &NewSession) -> Result<SwipeSession, DomainError> {
        let row = sqlx::query_as::<_, SwipeSession>(&format!(
            r#"INSERT INTO easy_reply.swipe_sessions (
                id, workspace_id, channel_id, user_id, session_metadata
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING {}"#,
            SESSION_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&session.workspace_id)
        .bind(&session.channel_id)
        .bind(&session.user_id)
        .bind(&session.metadata)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<SwipeSession>, DomainError> {
        let row = sqlx::query_as::<_, SwipeSession>(&format!(
            "SELECT {} FROM easy_reply.swipe_sessions WHERE id = $1",
            SESSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn record_swipe(&self, command: &SwipeCommand) -> Result<SwipeOutcome, DomainError> {
        let reply_sent = command.action.sends_reply(command.reply_content.as_deref());
        let reply_content = if reply_sent {
            command.reply_content.clone()
        } else {
            None
        };
        let status = command.action.resulting_status();

        let mut tx = self.pool.begin().await?;

        // Shared lock keeps end_session from closing the session mid-swipe.
        let gate = sqlx::query_as::<_, SessionGate>(
            "SELECT user_id, session_ended_at FROM easy_reply.swipe_sessions WHERE id = $1 FOR SHARE",
        )
        .bind(command.session_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("swipe session {}", command.session_id)))?;

        if gate.session_ended_at.is_some() {
            return Err(DomainError::ValidationError(format!(
                "swipe session {} has already ended",
                command.session_id
            )));
        }

        let updated = sqlx::query(
            r#"UPDATE easy_reply.comments SET
                status = $1,
                is_replied_by_us = $2,
                reply_content = $3,
                replied_at = CASE WHEN $2 THEN NOW() ELSE NULL END,
                reviewed_by = $4,
                reviewed_at = NOW(),
                updated_at = NOW()
            WHERE id = $5"#,
        )
        .bind(status.as_str())
        .bind(reply_sent)
        .bind(&reply_content)
        .bind(&gate.user_id)
        .bind(command.comment_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("comment {}", command.comment_id)));
        }

        // The swipe row keeps the submitted text even when nothing was sent.
        let swipe = sqlx::query_as::<_, CommentSwipe>(
            r#"INSERT INTO easy_reply.comment_swipes (
                id, session_id, comment_id, action, reply_sent, reply_content
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, session_id, comment_id, action, reply_sent, reply_content, swiped_at"#,
        )
        .bind(Uuid::now_v7())
        .bind(command.session_id)
        .bind(command.comment_id)
        .bind(command.action.as_str())
        .bind(reply_sent)
        .bind(&command.reply_content)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SwipeOutcome {
            swipe,
            comment_status: status,
        })
    }

    async fn end_session(&self, id: Uuid) -> Result<SwipeSession, DomainError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM easy_reply.swipe_sessions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("swipe session {}", id)))?;

        let (reviewed, replied) = sqlx::query_as::<_, (i32, i32)>(
            r#"SELECT
                COUNT(*)::int,
                (COUNT(*) FILTER (WHERE reply_sent))::int
            FROM easy_reply.comment_swipes
            WHERE session_id = $1"#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let session = sqlx::query_as::<_, SwipeSession>(&format!(
            r#"UPDATE easy_reply.swipe_sessions SET
                session_ended_at = NOW(),
                comments_reviewed = $1,
                comments_replied = $2
            WHERE id = $3
            RETURNING {}"#,
            SESSION_COLUMNS
        ))
        .bind(reviewed)
        .bind(replied)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(session)
    }

    async fn comment_totals(
        &self,
        workspace_id: &str,
        since: DateTime<Utc>,
    ) -> Result<(CommentTotals, Vec<CategoryBreakdown>), DomainError> {
        let totals = sqlx::query_as::<_, CommentTotals>(
            r#"SELECT
                COUNT(*) AS total_comments,
                COUNT(*) FILTER (WHERE ai_analyzed_at IS NOT NULL) AS analyzed_comments,
                COUNT(*) FILTER (WHERE is_replied_by_us) AS replied_comments,
                (AVG(ai_score) FILTER (WHERE ai_score IS NOT NULL))::float8 AS avg_ai_score,
                COUNT(*) FILTER (WHERE ai_priority = 'high') AS high_priority_comments
            FROM easy_reply.comments
            WHERE workspace_id = $1 AND created_at >= $2"#,
        )
        .bind(workspace_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        let categories = sqlx::query_as::<_, CategoryBreakdown>(
            r#"SELECT
                ai_category,
                COUNT(*) AS count,
                COUNT(*) FILTER (WHERE is_replied_by_us) AS replied_count
            FROM easy_reply.comments
            WHERE workspace_id = $1 AND created_at >= $2 AND ai_category IS NOT NULL
            GROUP BY ai_category
            ORDER BY count DESC, ai_category"#,
        )
        .bind(workspace_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok((totals, categories))
    }

    async fn session_totals(
        &self,
        workspace_id: &str,
        since: DateTime<Utc>,
    ) -> Result<SessionTotals, DomainError> {
        let totals = sqlx::query_as::<_, SessionTotals>(
            r#"SELECT
                COUNT(*) AS total_sessions,
                AVG(comments_reviewed)::float8 AS avg_comments_per_session,
                AVG(comments_replied)::float8 AS avg_replies_per_session,
                COALESCE(SUM(comments_replied), 0)::int8 AS total_replies_sent
            FROM easy_reply.swipe_sessions
            WHERE workspace_id = $1 AND session_started_at >= $2"#,
        )
        .bind(workspace_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }
}
