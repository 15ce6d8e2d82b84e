//! CLI for discovery-simple: list services and instances from static configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use discovery_simple::{
    ReactiveDiscoveryClient, ServiceInstance, SimpleDiscoveryProperties,
    SimpleReactiveDiscoveryClient,
};

#[derive(Parser)]
#[command(name = "discovery")]
#[command(about = "Query a static service registry")]
struct Cli {
    /// Configuration file (default: discovery.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Print JSON instead of plain lines
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured service names.
    Services,
    /// List instances of one service (nothing when unknown).
    Instances {
        /// Service name (case-sensitive)
        service: String,
    },
}

fn instance_line(inst: &ServiceInstance) -> String {
    match inst.instance_id() {
        Some(id) => format!("{} secure={} id={}", inst.uri(), inst.is_secure(), id),
        None => format!("{} secure={}", inst.uri(), inst.is_secure()),
    }
}

/// Instance fields plus the derived uri.
#[derive(Serialize)]
struct InstanceView<'a> {
    #[serde(flatten)]
    instance: &'a ServiceInstance,
    uri: String,
}

impl<'a> From<&'a ServiceInstance> for InstanceView<'a> {
    fn from(instance: &'a ServiceInstance) -> Self {
        Self {
            instance,
            uri: instance.uri(),
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let props = SimpleDiscoveryProperties::load(cli.config.as_deref())?;
    let client = SimpleReactiveDiscoveryClient::from_properties(&props)?;
    tracing::debug!(
        services = client.registry().len(),
        order = client.order(),
        "registry loaded"
    );

    match cli.command {
        Commands::Services => {
            let services: Vec<String> = client.services().collect().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&services)?);
            } else {
                for name in services {
                    println!("{}", name);
                }
            }
        }
        Commands::Instances { service } => {
            let instances: Vec<ServiceInstance> = client.instances(&service).collect().await;
            if instances.is_empty() {
                tracing::info!(service = %service, "no instances");
            }
            if cli.json {
                let views: Vec<InstanceView<'_>> =
                    instances.iter().map(InstanceView::from).collect();
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                for inst in &instances {
                    println!("{}", instance_line(inst));
                }
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    run(Cli::parse()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_view_carries_fields_and_uri() {
        let inst = ServiceInstance::from_uri("service", "https://host2:8443")
            .unwrap()
            .with_instance_id("service-2");
        let v = serde_json::to_value(InstanceView::from(&inst)).unwrap();
        assert_eq!(v["service_id"], "service");
        assert_eq!(v["instance_id"], "service-2");
        assert_eq!(v["host"], "host2");
        assert_eq!(v["port"], 8443);
        assert_eq!(v["secure"], true);
        assert_eq!(v["uri"], "https://host2:8443");
    }

    #[test]
    fn plain_line_shows_uri_and_secure() {
        let inst = ServiceInstance::from_uri("service", "http://host1:8080").unwrap();
        assert_eq!(instance_line(&inst), "http://host1:8080 secure=false");
    }
}
