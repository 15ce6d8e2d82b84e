//! Discovery client traits: services() and instances(service_id). Blocking and stream flavours.

use async_trait::async_trait;
use futures_util::future;
use futures_util::stream::{BoxStream, StreamExt};

use crate::{DiscoveryError, ServiceInstance, DEFAULT_ORDER};

/// Blocking discovery client. Implementations: static config, Consul, etc.
pub trait DiscoveryClient: Send + Sync {
    /// Human-readable name of the implementation.
    fn description(&self) -> &str;

    /// Instances of `service_id`, in registration order. Unknown id gives an empty list.
    fn instances(&self, service_id: &str) -> Vec<ServiceInstance>;

    /// All known service ids.
    fn services(&self) -> Vec<String>;

    /// Precedence when several clients are composed.
    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }

    /// Check that the backend can answer a query.
    fn probe(&self) -> Result<(), DiscoveryError> {
        self.services();
        Ok(())
    }
}

/// Stream-based discovery client. Each call returns a fresh, finite stream that completes after the last item.
#[async_trait]
pub trait ReactiveDiscoveryClient: Send + Sync {
    fn description(&self) -> &str;

    /// Instances of `service_id`, in registration order. Unknown id completes empty; it is not an error.
    fn instances(&self, service_id: &str) -> BoxStream<'static, ServiceInstance>;

    fn services(&self) -> BoxStream<'static, String>;

    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }

    /// Drain services() to check the backend answers.
    async fn probe(&self) -> Result<(), DiscoveryError> {
        self.services().for_each(|_| future::ready(())).await;
        Ok(())
    }
}
