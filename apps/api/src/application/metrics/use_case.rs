use super::dto::{
    CollectionCheckRequest, CollectionCheckResponse, PostMetricsResponse, SaveMetricsRequest,
    SaveMetricsResponse, StatsQueryRequest,
};
use crate::domain::{
    metrics::{
        entity::{PostMetricPoint, StatsPeriod, StatsRequest, StatsResponse},
        repository::MetricsRepository,
    },
    network::registry::NetworkRegistry,
    shared::errors::DomainError,
};
use chrono::{DateTime, Utc};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info, instrument};
use validator::Validate;

pub struct MetricsUseCase {
    repository: Arc<dyn MetricsRepository>,
    networks: Arc<NetworkRegistry>,
}

impl MetricsUseCase {
    pub fn new(repository: Arc<dyn MetricsRepository>, networks: Arc<NetworkRegistry>) -> Self {
        Self {
            repository,
            networks,
        }
    }

    #[instrument(skip(self, request), fields(count = request.samples.len()))]
    pub async fn save_metrics(
        &self,
        request: SaveMetricsRequest,
    ) -> Result<SaveMetricsResponse, DomainError> {
        request.validate()?;
        if let Some(bad) = request.samples.iter().find(|s| !s.value.is_finite()) {
            return Err(DomainError::ValidationError(format!(
                "{} value for channel {} is not a finite number",
                bad.metric_type, bad.channel_id
            )));
        }
        if request.samples.iter().any(|s| s.channel_id.is_empty() || s.workspace_id.is_empty()) {
            return Err(DomainError::ValidationError(
                "channel_id and workspace_id are required on every sample".into(),
            ));
        }

        let saved = self.repository.save_metrics(&request.samples).await?;
        info!(saved, "Saved metric samples");
        Ok(SaveMetricsResponse { saved })
    }

    /// Time-bucketed aggregation, one series per requested metric.
    ///
    /// `channel_id` narrows the query to one channel and overrides any
    /// `channel_ids` in the body.
    pub async fn get_stats(
        &self,
        workspace_id: &str,
        channel_id: Option<&str>,
        request: StatsQueryRequest,
    ) -> Result<StatsResponse, DomainError> {
        request.validate()?;
        if request.start_date > request.end_date {
            return Err(DomainError::ValidationError(
                "start_date must not be after end_date".into(),
            ));
        }

        let mut metrics = request.metrics;
        metrics.sort();
        metrics.dedup();

        let channel_ids = match channel_id {
            Some(id) => Some(vec![id.to_string()]),
            None => request.channel_ids.filter(|ids| !ids.is_empty()),
        };

        let stats_request = StatsRequest {
            workspace_id: workspace_id.to_string(),
            channel_ids,
            metrics,
            period: StatsPeriod {
                start_date: request.start_date,
                end_date: request.end_date,
            },
            granularity: request.granularity,
        };
        self.repository.get_stats(&stats_request).await
    }

    pub async fn check_collection(
        &self,
        channel_id: &str,
        request: CollectionCheckRequest,
    ) -> Result<CollectionCheckResponse, DomainError> {
        self.check_collection_at(channel_id, request, Utc::now()).await
    }

    /// Evaluates the platform's decay schedule for one post against `now`.
    #[instrument(skip(self, request, now), fields(platform = %request.platform, post_id = %request.post_id))]
    pub async fn check_collection_at(
        &self,
        channel_id: &str,
        request: CollectionCheckRequest,
        now: DateTime<Utc>,
    ) -> Result<CollectionCheckResponse, DomainError> {
        request.validate()?;
        let schedule = self.networks.collection_schedule(request.platform)?;

        let last_collection_at = match request.last_collection_at {
            Some(at) => Some(at),
            None => {
                self.repository
                    .last_collection_time(channel_id, &request.post_id)
                    .await?
            }
        };

        let decision = schedule.should_collect(request.post_created_at, last_collection_at, now)?;
        debug!(
            should_collect = decision.should_collect,
            metrics = decision.metrics_to_collect.len(),
            "Evaluated collection schedule"
        );

        Ok(CollectionCheckResponse {
            platform: request.platform,
            channel_id: channel_id.to_string(),
            post_id: request.post_id,
            last_collection_at,
            evaluated_at: now,
            decision,
        })
    }

    pub async fn post_metrics(
        &self,
        workspace_id: &str,
        channel_id: &str,
        post_id: &str,
    ) -> Result<PostMetricsResponse, DomainError> {
        let samples = self
            .repository
            .post_metrics(workspace_id, channel_id, post_id)
            .await?;

        let mut metrics: BTreeMap<_, Vec<PostMetricPoint>> = BTreeMap::new();
        for sample in samples {
            metrics
                .entry(sample.metric_type)
                .or_default()
                .push(PostMetricPoint {
                    value: sample.value,
                    collected_at: sample.collected_at,
                    metadata: sample.metadata,
                });
        }

        Ok(PostMetricsResponse {
            post_id: post_id.to_string(),
            metrics,
        })
    }
}
