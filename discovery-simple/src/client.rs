//! Blocking discovery client over a static Registry.

use std::sync::Arc;

use discovery_core::{DiscoveryClient, DiscoveryError, ServiceInstance};

use crate::properties::SimpleDiscoveryProperties;
use crate::registry::Registry;

pub const SIMPLE_DESCRIPTION: &str = "Simple Discovery Client";

/// Answers from a Registry fixed at construction. Clones share the registry.
#[derive(Clone, Debug)]
pub struct SimpleDiscoveryClient {
    registry: Arc<Registry>,
}

impl SimpleDiscoveryClient {
    pub fn new(registry: impl Into<Arc<Registry>>) -> Self {
        Self {
            registry: registry.into(),
        }
    }

    /// Run `init()` on the properties and wrap the result.
    pub fn from_properties(props: &SimpleDiscoveryProperties) -> Result<Self, DiscoveryError> {
        Ok(Self::new(props.init()?))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl DiscoveryClient for SimpleDiscoveryClient {
    fn description(&self) -> &str {
        SIMPLE_DESCRIPTION
    }

    fn instances(&self, service_id: &str) -> Vec<ServiceInstance> {
        tracing::trace!(service = %service_id, "instances lookup");
        self.registry.instances(service_id).to_vec()
    }

    fn services(&self) -> Vec<String> {
        self.registry.services().map(str::to_string).collect()
    }

    fn order(&self) -> i32 {
        self.registry.order()
    }
}
