//! Discovery core: ServiceInstance, DiscoveryClient and ReactiveDiscoveryClient. Shared by every discovery backend.

pub mod instance;
pub mod service_discovery;

pub use instance::ServiceInstance;
pub use service_discovery::{DiscoveryClient, ReactiveDiscoveryClient};

use thiserror::Error;

/// Precedence for clients that do not set their own. Lower runs first when clients are composed.
pub const DEFAULT_ORDER: i32 = 0;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("invalid uri {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
    #[error("uri has no host: {0}")]
    MissingHost(String),
}
