use super::entity::{
    CategoryBreakdown, CommentTotals, NewSession, SessionTotals, SwipeCommand, SwipeOutcome,
    SwipeSession,
};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TriageRepository: Send + Sync {
    async fn start_session(&self, session: &NewSession) -> Result<SwipeSession, DomainError>;
    async fn find_session(&self, id: Uuid) -> Result<Option<SwipeSession>, DomainError>;
    /// Appends the swipe and applies it to the comment atomically.
    async fn record_swipe(&self, command: &SwipeCommand) -> Result<SwipeOutcome, DomainError>;
    /// Recomputes the session counters from its swipes and stamps the end time.
    async fn end_session(&self, id: Uuid) -> Result<SwipeSession, DomainError>;
    async fn comment_totals(
        &self,
        workspace_id: &str,
        since: DateTime<Utc>,
    ) -> Result<(CommentTotals, Vec<CategoryBreakdown>), DomainError>;
    async fn session_totals(
        &self,
        workspace_id: &str,
        since: DateTime<Utc>,
    ) -> Result<SessionTotals, DomainError>;
}
