use crate::domain::{
    metrics::{
        entity::{Granularity, MetricType, NewMetricSample, PostMetricPoint},
        schedule::CollectionDecision,
    },
    network::capability::SocialPlatform,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveMetricsRequest {
    #[validate(length(min = 1, max = 1000))]
    pub samples: Vec<NewMetricSample>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SaveMetricsResponse {
    pub saved: u64,
}

#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct StatsQueryRequest {
    pub channel_ids: Option<Vec<String>>,
    #[validate(length(min = 1, max = 8))]
    pub metrics: Vec<MetricType>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub granularity: Granularity,
}

#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CollectionCheckRequest {
    pub platform: SocialPlatform,
    #[validate(length(min = 1, max = 255))]
    pub post_id: String,
    pub post_created_at: DateTime<Utc>,
    /// Read from stored samples when omitted.
    pub last_collection_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct CollectionCheckResponse {
    pub platform: SocialPlatform,
    pub channel_id: String,
    pub post_id: String,
    pub last_collection_at: Option<DateTime<Utc>>,
    pub evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub decision: CollectionDecision,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PostMetricsResponse {
    pub post_id: String,
    pub metrics: BTreeMap<MetricType, Vec<PostMetricPoint>>,
}
