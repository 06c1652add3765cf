pub mod linkedin;

use crate::domain::network::registry::NetworkRegistry;
use std::sync::Arc;

/// Registry with every backend this service ships.
pub fn default_registry() -> anyhow::Result<NetworkRegistry> {
    let mut registry = NetworkRegistry::new();
    registry.register(Arc::new(linkedin::LinkedInBackend::new()?));
    Ok(registry)
}
