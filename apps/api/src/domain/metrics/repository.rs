use super::entity::{MetricSample, NewMetricSample, StatsRequest, StatsResponse};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Upserts the batch in one transaction; returns the number of rows written.
    async fn save_metrics(&self, samples: &[NewMetricSample]) -> Result<u64, DomainError>;
    async fn get_stats(&self, request: &StatsRequest) -> Result<StatsResponse, DomainError>;
    /// Latest `collected_at` across every metric type of the post.
    async fn last_collection_time(
        &self,
        channel_id: &str,
        post_id: &str,
    ) -> Result<Option<DateTime<Utc>>, DomainError>;
    async fn post_metrics(
        &self,
        workspace_id: &str,
        channel_id: &str,
        post_id: &str,
    ) -> Result<Vec<MetricSample>, DomainError>;
}
