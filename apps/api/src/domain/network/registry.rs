use super::capability::{Capability, NetworkBackend, SocialPlatform};
use crate::domain::{metrics::schedule::CollectionSchedule, shared::errors::DomainError};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc};

#[derive(Debug, Clone, Serialize)]
pub struct NetworkDescriptor {
    pub platform: SocialPlatform,
    pub capabilities: Vec<Capability>,
}

/// Backends keyed by platform. Built once at startup and shared read-only.
#[derive(Default, Clone)]
pub struct NetworkRegistry {
    backends: HashMap<SocialPlatform, Arc<dyn NetworkBackend>>,
}

impl NetworkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a backend, replacing any previous one for the same platform.
    pub fn register(&mut self, backend: Arc<dyn NetworkBackend>) {
        let platform = backend.platform();
        if self.backends.insert(platform, backend).is_some() {
            tracing::warn!(%platform, "Replaced previously registered network backend");
        } else {
            tracing::debug!(%platform, "Registered network backend");
        }
    }

    pub fn get(&self, platform: SocialPlatform) -> Option<&Arc<dyn NetworkBackend>> {
        self.backends.get(&platform)
    }

    pub fn supporting(&self, capability: Capability) -> Vec<SocialPlatform> {
        let mut platforms: Vec<_> = self
            .backends
            .values()
            .filter(|b| b.supports(capability))
            .map(|b| b.platform())
            .collect();
        platforms.sort();
        platforms
    }

    pub fn descriptors(&self) -> Vec<NetworkDescriptor> {
        let mut descriptors: Vec<_> = self
            .backends
            .values()
            .map(|b| NetworkDescriptor {
                platform: b.platform(),
                capabilities: b.capabilities().to_vec(),
            })
            .collect();
        descriptors.sort_by_key(|d| d.platform);
        descriptors
    }

    pub fn collection_schedule(
        &self,
        platform: SocialPlatform,
    ) -> Result<&CollectionSchedule, DomainError> {
        let backend = self.get(platform).ok_or_else(|| {
            DomainError::ValidationError(format!("platform '{}' is not available", platform))
        })?;
        if !backend.supports(Capability::Statistics) {
            return Err(DomainError::ValidationError(format!(
                "platform '{}' does not support statistics",
                platform
            )));
        }
        backend.collection_schedule().ok_or_else(|| {
            DomainError::InfrastructureError(format!(
                "platform '{}' declares statistics without a collection schedule",
                platform
            ))
        })
    }
}
