//! Age-decaying metrics collection policy.
//!
//! A [`CollectionSchedule`] is an ordered table of [`CollectionRule`]s. The rule
//! whose threshold is the largest one not exceeding the post's age decides both
//! how often the post is polled and which metrics are fetched, so fresh posts are
//! polled often and broadly while old posts are polled rarely for a few metrics.
//!
//! Evaluation is pure: the caller supplies a single `now` for the whole decision.

use super::entity::MetricType;
use crate::domain::shared::errors::DomainError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRule {
    /// Minimum post age, in hours, at which this rule takes over.
    pub post_age_hours: u32,
    pub frequency_minutes: u32,
    pub metrics_to_collect: Vec<MetricType>,
}

impl CollectionRule {
    pub fn new(post_age_hours: u32, frequency_minutes: u32, metrics: &[MetricType]) -> Self {
        Self {
            post_age_hours,
            frequency_minutes,
            metrics_to_collect: metrics.to_vec(),
        }
    }

    fn threshold(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.post_age_hours))
    }

    fn frequency(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.frequency_minutes))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CollectionDecision {
    pub should_collect: bool,
    /// Set only when a collection is not due yet.
    pub next_collection_at: Option<DateTime<Utc>>,
    /// The applicable rule's metric set, reported even when not due.
    pub metrics_to_collect: Vec<MetricType>,
}

impl CollectionDecision {
    fn skip() -> Self {
        Self {
            should_collect: false,
            next_collection_at: None,
            metrics_to_collect: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSchedule {
    /// Sorted by ascending threshold, thresholds unique.
    rules: Vec<CollectionRule>,
}

impl CollectionSchedule {
    pub fn new(mut rules: Vec<CollectionRule>) -> Result<Self, DomainError> {
        if rules.is_empty() {
            return Err(DomainError::ValidationError(
                "collection schedule needs at least one rule".into(),
            ));
        }
        rules.sort_by_key(|r| r.post_age_hours);

        for pair in rules.windows(2) {
            if pair[0].post_age_hours == pair[1].post_age_hours {
                return Err(DomainError::ValidationError(format!(
                    "duplicate collection rule for post age {}h",
                    pair[0].post_age_hours
                )));
            }
        }
        if let Some(rule) = rules.iter().find(|r| r.frequency_minutes == 0) {
            return Err(DomainError::ValidationError(format!(
                "collection rule at {}h has a zero frequency",
                rule.post_age_hours
            )));
        }
        if let Some(rule) = rules.iter().find(|r| r.metrics_to_collect.is_empty()) {
            return Err(DomainError::ValidationError(format!(
                "collection rule at {}h collects no metrics",
                rule.post_age_hours
            )));
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[CollectionRule] {
        &self.rules
    }

    /// The rule with the largest threshold not exceeding `post_age`.
    pub fn rule_for_age(&self, post_age: TimeDelta) -> Option<&CollectionRule> {
        self.rules.iter().rev().find(|r| post_age >= r.threshold())
    }

    pub fn should_collect(
        &self,
        post_created_at: DateTime<Utc>,
        last_collection_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<CollectionDecision, DomainError> {
        let post_age = now - post_created_at;
        if post_age < TimeDelta::zero() {
            return Err(DomainError::ValidationError(
                "post_created_at is in the future".into(),
            ));
        }
        if last_collection_at.is_some_and(|last| last > now) {
            return Err(DomainError::ValidationError(
                "last_collection_at is in the future".into(),
            ));
        }

        let Some(rule) = self.rule_for_age(post_age) else {
            return Ok(CollectionDecision::skip());
        };

        if let Some(last) = last_collection_at {
            let frequency = rule.frequency();
            if now - last < frequency {
                return Ok(CollectionDecision {
                    should_collect: false,
                    next_collection_at: Some(last + frequency),
                    metrics_to_collect: rule.metrics_to_collect.clone(),
                });
            }
        }

        Ok(CollectionDecision {
            should_collect: true,
            next_collection_at: None,
            metrics_to_collect: rule.metrics_to_collect.clone(),
        })
    }
}
