//! Registry: immutable service name -> instances map built by SimpleDiscoveryProperties::init.

use std::collections::BTreeMap;

use discovery_core::ServiceInstance;

/// Read-only after construction. Service names iterate in lexical order; instances keep config order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    instances: BTreeMap<String, Vec<ServiceInstance>>,
    order: i32,
}

impl Registry {
    pub fn new(instances: BTreeMap<String, Vec<ServiceInstance>>, order: i32) -> Self {
        Self { instances, order }
    }

    /// Every configured service name, including ones with no instances.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// Instances of `service_id`; empty slice when unknown.
    pub fn instances(&self, service_id: &str) -> &[ServiceInstance] {
        self.instances
            .get(service_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
