use crate::domain::{
    metrics::{
        entity::{DataPoint, MetricSample, MetricSeries, NewMetricSample, StatsRequest, StatsResponse},
        repository::MetricsRepository,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub struct SqlxMetricsRepository {
    pub pool: PgPool,
}

impl SqlxMetricsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for SqlxMetricsRepository {
    async fn save_metrics(&self, samples: &[NewMetricSample]) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for sample in samples {
            let result = sqlx::query(
                r#"INSERT INTO metrics (
                    id, channel_id, workspace_id, platform, post_id, metric_type,
                    value, metadata, collected_at, collected_on, post_created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                ON CONFLICT ON CONSTRAINT metrics_daily_sample DO UPDATE SET
                    value = EXCLUDED.value,
                    metadata = EXCLUDED.metadata,
                    collected_at = EXCLUDED.collected_at"#,
            )
            .bind(Uuid::now_v7())
            .bind(&sample.channel_id)
            .bind(&sample.workspace_id)
            .bind(&sample.platform)
            .bind(&sample.post_id)
            .bind(sample.metric_type.as_str())
            .bind(sample.value)
            .bind(&sample.metadata)
            .bind(sample.collected_at)
            .bind(sample.collected_at.date_naive())
            .bind(sample.post_created_at)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    async fn get_stats(&self, request: &StatsRequest) -> Result<StatsResponse, DomainError> {
        let mut conn = self.pool.acquire().await?;
        let mut response = StatsResponse::default();

        for metric in &request.metrics {
            let mut builder = QueryBuilder::<Postgres>::new("SELECT date_trunc(");
            builder
                .push_bind(request.granularity.as_str())
                .push(", collected_at, 'UTC') AS date, AVG(value)::float8 AS value FROM metrics WHERE workspace_id = ")
                .push_bind(request.workspace_id.clone())
                .push(" AND metric_type = ")
                .push_bind(metric.as_str())
                .push(" AND collected_at >= ")
                .push_bind(request.period.start_date)
                .push(" AND collected_at <= ")
                .push_bind(request.period.end_date);

            if let Some(channel_ids) = &request.channel_ids {
                builder
                    .push(" AND channel_id = ANY(")
                    .push_bind(channel_ids.clone())
                    .push(")");
            }
            builder.push(" GROUP BY 1 ORDER BY 1");

            let buckets = builder
                .build_query_as::<DataPoint>()
                .fetch_all(&mut *conn)
                .await?;
            response
                .metrics
                .insert(*metric, MetricSeries::from_buckets(buckets));
        }

        Ok(response)
    }

    async fn last_collection_time(
        &self,
        channel_id: &str,
        post_id: &str,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let last = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT MAX(collected_at) FROM metrics WHERE channel_id = $1 AND post_id = $2",
        )
        .bind(channel_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(last)
    }

    async fn post_metrics(
        &self,
        workspace_id: &str,
        channel_id: &str,
        post_id: &str,
    ) -> Result<Vec<MetricSample>, DomainError> {
        let samples = sqlx::query_as::<_, MetricSample>(
            r#"SELECT id, channel_id, workspace_id, platform, post_id, metric_type, value,
                    metadata, collected_at, post_created_at
            FROM metrics
            WHERE workspace_id = $1 AND channel_id = $2 AND post_id = $3
            ORDER BY collected_at DESC, metric_type"#,
        )
        .bind(workspace_id)
        .bind(channel_id)
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(samples)
    }
}
