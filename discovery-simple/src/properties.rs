//! Static discovery properties: service name -> list of URIs. Loaded from defaults, TOML file and env.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use discovery_core::{DiscoveryError, ServiceInstance, DEFAULT_ORDER};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::Registry;

/// File read by `load(None)`.
pub const DEFAULT_CONFIG_FILE: &str = "discovery.toml";
/// Env variables are `DISCOVERY__SIMPLE__<FIELD>`.
pub const ENV_PREFIX: &str = "DISCOVERY__";
/// Table holding the properties in the file and the env.
pub const PROPERTIES_KEY: &str = "simple";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
    #[error("configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// One configured instance: either a bare URI or a table with id and metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstanceConfig {
    Uri(String),
    Detailed {
        uri: String,
        #[serde(default)]
        instance_id: Option<String>,
        #[serde(default)]
        metadata: BTreeMap<String, String>,
    },
}

impl InstanceConfig {
    pub fn uri(&self) -> &str {
        match self {
            InstanceConfig::Uri(uri) => uri,
            InstanceConfig::Detailed { uri, .. } => uri,
        }
    }

    /// Build the instance; `service_id` is always the key it is listed under.
    fn build(&self, service_id: &str) -> Result<ServiceInstance, DiscoveryError> {
        match self {
            InstanceConfig::Uri(uri) => ServiceInstance::from_uri(service_id, uri),
            InstanceConfig::Detailed {
                uri,
                instance_id,
                metadata,
            } => {
                let mut inst =
                    ServiceInstance::from_uri(service_id, uri)?.with_metadata(metadata.clone());
                if let Some(id) = instance_id {
                    inst = inst.with_instance_id(id.clone());
                }
                Ok(inst)
            }
        }
    }
}

impl From<&str> for InstanceConfig {
    fn from(uri: &str) -> Self {
        InstanceConfig::Uri(uri.to_string())
    }
}

/// Raw static discovery configuration. Call `init()` to get the immutable Registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleDiscoveryProperties {
    #[serde(default)]
    pub instances: BTreeMap<String, Vec<InstanceConfig>>,
    #[serde(default = "default_order")]
    pub order: i32,
}

fn default_order() -> i32 {
    DEFAULT_ORDER
}

impl Default for SimpleDiscoveryProperties {
    fn default() -> Self {
        Self {
            instances: BTreeMap::new(),
            order: DEFAULT_ORDER,
        }
    }
}

impl SimpleDiscoveryProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a service with the given URIs, in order.
    pub fn service<I, T>(mut self, name: &str, uris: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<InstanceConfig>,
    {
        self.instances
            .insert(name.to_string(), uris.into_iter().map(Into::into).collect());
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Defaults, then `path` (or `discovery.toml`), then `DISCOVERY__` env; read from the `[simple]` table.
    /// Only the default file may be absent; an explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) if !p.is_file() => return Err(ConfigError::MissingFile(p.to_path_buf())),
            Some(p) => p,
            None => Path::new(DEFAULT_CONFIG_FILE),
        };
        let props: Self = Figment::from(Serialized::default(PROPERTIES_KEY, Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract_inner(PROPERTIES_KEY)
            .map_err(Box::new)?;
        Ok(props)
    }

    /// Convert raw URIs to ServiceInstances. Fails on the first URI that does not parse.
    pub fn init(&self) -> Result<Registry, DiscoveryError> {
        let mut instances = BTreeMap::new();
        for (service_id, configs) in &self.instances {
            let built = configs
                .iter()
                .map(|c| c.build(service_id))
                .collect::<Result<Vec<_>, _>>()?;
            tracing::debug!(
                service = %service_id,
                instances = built.len(),
                "static service registered"
            );
            instances.insert(service_id.clone(), built);
        }
        Ok(Registry::new(instances, self.order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn init_stamps_service_id_and_keeps_order() {
        let registry = SimpleDiscoveryProperties::new()
            .service("service", ["http://host1:8080", "https://host2:8443"])
            .init()
            .unwrap();
        let insts = registry.instances("service");
        assert_eq!(insts.len(), 2);
        assert!(insts.iter().all(|i| i.service_id() == "service"));
        assert_eq!(insts[0].host(), "host1");
        assert_eq!(insts[1].host(), "host2");
        assert!(insts[1].is_secure());
    }

    #[test]
    fn init_fails_on_bad_uri() {
        let err = SimpleDiscoveryProperties::new()
            .service("broken", ["http://ok:1", "::nope::"])
            .init()
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidUri { .. }));
    }

    #[test]
    fn detailed_entry_carries_id_and_metadata() {
        let mut metadata = BTreeMap::new();
        metadata.insert("zone".to_string(), "a".to_string());
        let mut props = SimpleDiscoveryProperties::new();
        props.instances.insert(
            "svc".to_string(),
            vec![InstanceConfig::Detailed {
                uri: "https://h:1".to_string(),
                instance_id: Some("svc-1".to_string()),
                metadata: metadata.clone(),
            }],
        );
        let registry = props.init().unwrap();
        let inst = &registry.instances("svc")[0];
        assert_eq!(inst.instance_id(), Some("svc-1"));
        assert_eq!(inst.metadata(), &metadata);
    }

    #[test]
    fn load_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let props = SimpleDiscoveryProperties::load(None).map_err(|e| e.to_string())?;
            assert_eq!(props, SimpleDiscoveryProperties::default());
            Ok(())
        });
    }

    #[test]
    fn load_from_toml_accepts_both_entry_forms() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "discovery.toml",
                r#"
                [simple]
                order = 3

                [simple.instances]
                service = [
                    "http://host1:8080",
                    { uri = "https://host2:8443", instance_id = "two", metadata = { zone = "b" } },
                ]
                "#,
            )?;
            let props = SimpleDiscoveryProperties::load(None).map_err(|e| e.to_string())?;
            assert_eq!(props.order, 3);
            let entries = &props.instances["service"];
            assert_eq!(entries[0], InstanceConfig::Uri("http://host1:8080".to_string()));
            assert_eq!(entries[1].uri(), "https://host2:8443");
            let registry = props.init().map_err(|e| e.to_string())?;
            assert_eq!(registry.instances("service")[1].instance_id(), Some("two"));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[simple]\norder = 3\n")?;
            jail.set_env("DISCOVERY__SIMPLE__ORDER", "7");
            let props = SimpleDiscoveryProperties::load(Some(Path::new("custom.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(props.order, 7);
            Ok(())
        });
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = SimpleDiscoveryProperties::load(Some(Path::new("does-not-exist.toml")))
                .unwrap_err();
            match err {
                ConfigError::MissingFile(path) => {
                    assert_eq!(path, PathBuf::from("does-not-exist.toml"))
                }
                _ => panic!("expected MissingFile"),
            }
            Ok(())
        });
    }
}
