use crate::domain::shared::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MetricType {
    Likes,
    Comments,
    Shares,
    Views,
    Clicks,
    Impressions,
    EngagementRate,
    Reach,
}

impl MetricType {
    pub const ALL: [MetricType; 8] = [
        Self::Likes,
        Self::Comments,
        Self::Shares,
        Self::Views,
        Self::Clicks,
        Self::Impressions,
        Self::EngagementRate,
        Self::Reach,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Comments => "comments",
            Self::Shares => "shares",
            Self::Views => "views",
            Self::Clicks => "clicks",
            Self::Impressions => "impressions",
            Self::EngagementRate => "engagement_rate",
            Self::Reach => "reach",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DomainError::ValidationError(format!("unknown metric type '{}'", s)))
    }
}

impl TryFrom<String> for MetricType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Bucket width for time-series aggregation; the value is a `date_trunc` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Granularity {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// A stored metric observation.
///
/// At most one sample exists per `(channel_id, post_id, metric_type, UTC day of
/// collected_at)`; a same-day re-collection overwrites the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct MetricSample {
    pub id: Uuid,
    pub channel_id: String,
    pub workspace_id: String,
    pub platform: String,
    pub post_id: Option<String>,
    #[sqlx(try_from = "String")]
    pub metric_type: MetricType,
    pub value: f64,
    pub metadata: serde_json::Value,
    pub collected_at: DateTime<Utc>,
    pub post_created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMetricSample {
    pub channel_id: String,
    pub workspace_id: String,
    pub platform: String,
    pub post_id: Option<String>,
    pub metric_type: MetricType,
    pub value: f64,
    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
    pub collected_at: DateTime<Utc>,
    pub post_created_at: Option<DateTime<Utc>>,
}

fn empty_metadata() -> serde_json::Value {
    serde_json::json!({})
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatsPeriod {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StatsRequest {
    pub workspace_id: String,
    pub channel_ids: Option<Vec<String>>,
    pub metrics: Vec<MetricType>,
    pub period: StatsPeriod,
    pub granularity: Granularity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct DataPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MetricSeries {
    /// Sum over buckets of each bucket's average.
    pub current_value: f64,
    pub data_points: Vec<DataPoint>,
}

impl MetricSeries {
    pub fn from_buckets(data_points: Vec<DataPoint>) -> Self {
        let current_value = data_points.iter().map(|p| p.value).sum();
        Self {
            current_value,
            data_points,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatsResponse {
    pub metrics: BTreeMap<MetricType, MetricSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostMetricPoint {
    pub value: f64,
    pub collected_at: DateTime<Utc>,
    pub metadata: serde_json::Value,
}
