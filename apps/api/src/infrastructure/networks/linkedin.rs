use crate::domain::{
    metrics::{
        entity::MetricType::{self, *},
        schedule::{CollectionRule, CollectionSchedule},
    },
    network::capability::{Capability, NetworkBackend, SocialPlatform},
};

const FULL: &[MetricType] = &[Likes, Comments, Shares, Views, Impressions];
const NO_IMPRESSIONS: &[MetricType] = &[Likes, Comments, Shares, Views];
const ENGAGEMENT: &[MetricType] = &[Likes, Comments, Shares];
const REACTIONS: &[MetricType] = &[Likes, Comments];
const LIKES_ONLY: &[MetricType] = &[Likes];

const HOUR: u32 = 60;
const DAY: u32 = 24 * HOUR;

pub struct LinkedInBackend {
    schedule: CollectionSchedule,
}

impl LinkedInBackend {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            schedule: CollectionSchedule::new(collection_rules())?,
        })
    }
}

fn collection_rules() -> Vec<CollectionRule> {
    vec![
        CollectionRule::new(0, 5, FULL),
        CollectionRule::new(1, 30, FULL),
        CollectionRule::new(6, HOUR, FULL),
        CollectionRule::new(24, 2 * HOUR, NO_IMPRESSIONS),
        CollectionRule::new(72, 6 * HOUR, NO_IMPRESSIONS),
        CollectionRule::new(168, 12 * HOUR, ENGAGEMENT),
        CollectionRule::new(336, DAY, ENGAGEMENT),
        CollectionRule::new(504, 2 * DAY, REACTIONS),
        CollectionRule::new(720, 7 * DAY, REACTIONS),
        CollectionRule::new(2160, 30 * DAY, LIKES_ONLY),
        CollectionRule::new(8760, 90 * DAY, LIKES_ONLY),
        CollectionRule::new(43800, 365 * DAY, LIKES_ONLY),
    ]
}

impl NetworkBackend for LinkedInBackend {
    fn platform(&self) -> SocialPlatform {
        SocialPlatform::LinkedIn
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::Posting, Capability::Messaging, Capability::Statistics]
    }

    fn collection_schedule(&self) -> Option<&CollectionSchedule> {
        Some(&self.schedule)
    }
}
