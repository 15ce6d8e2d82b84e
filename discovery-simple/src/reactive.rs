//! Reactive discovery client: same static Registry, answered as finite streams.

use std::sync::Arc;

use discovery_core::{DiscoveryError, ReactiveDiscoveryClient, ServiceInstance};
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::properties::SimpleDiscoveryProperties;
use crate::registry::Registry;

pub const SIMPLE_REACTIVE_DESCRIPTION: &str = "Simple Reactive Discovery Client";

/// Each query snapshots the registry into a Vec and streams it; the stream never waits.
#[derive(Clone, Debug)]
pub struct SimpleReactiveDiscoveryClient {
    registry: Arc<Registry>,
}

impl SimpleReactiveDiscoveryClient {
    pub fn new(registry: impl Into<Arc<Registry>>) -> Self {
        Self {
            registry: registry.into(),
        }
    }

    pub fn from_properties(props: &SimpleDiscoveryProperties) -> Result<Self, DiscoveryError> {
        Ok(Self::new(props.init()?))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl ReactiveDiscoveryClient for SimpleReactiveDiscoveryClient {
    fn description(&self) -> &str {
        SIMPLE_REACTIVE_DESCRIPTION
    }

    fn instances(&self, service_id: &str) -> BoxStream<'static, ServiceInstance> {
        tracing::trace!(service = %service_id, "instances lookup");
        stream::iter(self.registry.instances(service_id).to_vec()).boxed()
    }

    fn services(&self) -> BoxStream<'static, String> {
        let names: Vec<String> = self.registry.services().map(str::to_string).collect();
        stream::iter(names).boxed()
    }

    fn order(&self) -> i32 {
        self.registry.order()
    }
}
