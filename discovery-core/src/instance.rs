//! ServiceInstance: one addressable endpoint of a named service.

use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

use crate::DiscoveryError;

const HTTP_PORT: u16 = 80;
const HTTPS_PORT: u16 = 443;

/// One instance of a service: host, port, secure flag, optional id and metadata.
/// Built once (from a URI or parts) and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceInstance {
    instance_id: Option<String>,
    service_id: String,
    host: String,
    port: u16,
    secure: bool,
    metadata: BTreeMap<String, String>,
}

impl ServiceInstance {
    pub fn new(
        service_id: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        secure: bool,
    ) -> Self {
        Self {
            instance_id: None,
            service_id: service_id.into(),
            host: host.into(),
            port,
            secure,
            metadata: BTreeMap::new(),
        }
    }

    /// Parse `uri` and build an instance of `service_id`. Scheme `https` means secure.
    /// A missing port falls back to the scheme default (443 when secure, 80 otherwise).
    /// Hosts of http/https URIs come back lowercased (`http://Host1` gives `host1`).
    pub fn from_uri(service_id: impl Into<String>, uri: &str) -> Result<Self, DiscoveryError> {
        let url = Url::parse(uri).map_err(|source| DiscoveryError::InvalidUri {
            uri: uri.to_string(),
            source,
        })?;
        Self::from_url(service_id, &url)
    }

    pub fn from_url(service_id: impl Into<String>, url: &Url) -> Result<Self, DiscoveryError> {
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| DiscoveryError::MissingHost(url.to_string()))?;
        let secure = url.scheme() == "https";
        let default_port = if secure { HTTPS_PORT } else { HTTP_PORT };
        let port = url.port_or_known_default().unwrap_or(default_port);
        Ok(Self::new(service_id, host, port, secure))
    }

    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn instance_id(&self) -> Option<&str> {
        self.instance_id.as_deref()
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// "https" when secure, "http" otherwise.
    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// `scheme://host:port`, always with an explicit port.
    pub fn uri(&self) -> String {
        format!("{}://{}:{}", self.scheme(), self.host, self.port)
    }
}
