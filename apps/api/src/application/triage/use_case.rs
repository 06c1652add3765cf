use super::dto::{ActivitySummaryParams, RecordSwipeRequest, StartSessionRequest};
use crate::domain::{
    shared::errors::DomainError,
    triage::{
        entity::{ActivitySummary, NewSession, SwipeCommand, SwipeOutcome, SwipeSession},
        repository::TriageRepository,
    },
};
use chrono::{TimeDelta, Utc};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Drives swipe sessions: start, record swipes, end, and report activity.
///
/// A swipe is the only way a comment's triage status changes. The latest
/// swipe wins, whatever status the comment was in before.
pub struct TriageUseCase {
    repository: Arc<dyn TriageRepository>,
}

impl TriageUseCase {
    pub fn new(repository: Arc<dyn TriageRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, request), fields(workspace_id = %request.workspace_id))]
    pub async fn start_session(
        &self,
        request: StartSessionRequest,
    ) -> Result<SwipeSession, DomainError> {
        request.validate()?;
        let session = NewSession {
            workspace_id: request.workspace_id,
            channel_id: request.channel_id,
            user_id: request.user_id,
            metadata: request
                .metadata
                .unwrap_or_else(|| serde_json::json!({ "started_from": "web_app" })),
        };
        let session = self.repository.start_session(&session).await?;
        info!(session_id = %session.id, "Started swipe session");
        Ok(session)
    }

    pub async fn get_session(&self, session_id: Uuid) -> Result<SwipeSession, DomainError> {
        self.repository
            .find_session(session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("swipe session {}", session_id)))
    }

    #[instrument(skip(self, request), fields(session_id = %request.session_id, comment_id = %request.comment_id))]
    pub async fn record_swipe(
        &self,
        request: RecordSwipeRequest,
    ) -> Result<SwipeOutcome, DomainError> {
        request.validate()?;
        let command = SwipeCommand {
            session_id: request.session_id,
            comment_id: request.comment_id,
            action: request.action,
            reply_content: request.reply_content,
        };
        let outcome = self.repository.record_swipe(&command).await?;
        info!(
            action = %outcome.swipe.action,
            reply_sent = outcome.swipe.reply_sent,
            "Recorded swipe"
        );
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn end_session(&self, session_id: Uuid) -> Result<SwipeSession, DomainError> {
        let session = self.repository.end_session(session_id).await?;
        info!(
            reviewed = session.comments_reviewed,
            replied = session.comments_replied,
            "Ended swipe session"
        );
        Ok(session)
    }

    #[instrument(skip(self, params))]
    pub async fn activity_summary(
        &self,
        workspace_id: &str,
        params: ActivitySummaryParams,
    ) -> Result<ActivitySummary, DomainError> {
        params.validate()?;
        let now = Utc::now();
        let since = now - TimeDelta::days(params.period_days);

        let (global_stats, category_breakdown) =
            self.repository.comment_totals(workspace_id, since).await?;
        let swipe_sessions = self.repository.session_totals(workspace_id, since).await?;

        Ok(ActivitySummary {
            period_days: params.period_days,
            global_stats,
            category_breakdown,
            swipe_sessions,
            generated_at: now,
        })
    }
}
