//! Static discovery: properties -> Registry -> blocking and reactive clients on discovery-core.

pub mod client;
pub mod properties;
pub mod reactive;
pub mod registry;

pub use client::{SimpleDiscoveryClient, SIMPLE_DESCRIPTION};
pub use discovery_core::{
    DiscoveryClient, DiscoveryError, ReactiveDiscoveryClient, ServiceInstance, DEFAULT_ORDER,
};
pub use properties::{ConfigError, InstanceConfig, SimpleDiscoveryProperties};
pub use reactive::{SimpleReactiveDiscoveryClient, SIMPLE_REACTIVE_DESCRIPTION};
pub use registry::Registry;
