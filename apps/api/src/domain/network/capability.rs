use crate::domain::{metrics::schedule::CollectionSchedule, shared::errors::DomainError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Twitter,
    LinkedIn,
    Youtube,
    Tiktok,
    Wordpress,
    Pinterest,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 8] = [
        Self::Facebook,
        Self::Instagram,
        Self::Twitter,
        Self::LinkedIn,
        Self::Youtube,
        Self::Tiktok,
        Self::Wordpress,
        Self::Pinterest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::LinkedIn => "linkedin",
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
            Self::Wordpress => "wordpress",
            Self::Pinterest => "pinterest",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialPlatform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lowered)
            .ok_or_else(|| DomainError::ValidationError(format!("unknown platform '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Capability {
    Posting,
    Messaging,
    Statistics,
}

/// A social network integration, described by the capabilities it declares.
///
/// Backends only answer for what they declare: a backend without
/// [`Capability::Statistics`] has no collection schedule.
pub trait NetworkBackend: Send + Sync {
    fn platform(&self) -> SocialPlatform;

    fn capabilities(&self) -> &[Capability];

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    fn collection_schedule(&self) -> Option<&CollectionSchedule> {
        None
    }
}
