//! Example: two static services queried through the reactive client.

use discovery_simple::{
    ReactiveDiscoveryClient, SimpleDiscoveryProperties, SimpleReactiveDiscoveryClient,
};
use futures_util::StreamExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let props = SimpleDiscoveryProperties::new()
        .service("orders", ["http://orders-1:8080", "https://orders-2:8443"])
        .service("billing", ["https://billing"]);
    let client = SimpleReactiveDiscoveryClient::from_properties(&props)?;

    println!("{} (order {})", client.description(), client.order());
    let mut services = client.services();
    while let Some(name) = services.next().await {
        println!("{}", name);
        let mut instances = client.instances(&name);
        while let Some(inst) = instances.next().await {
            println!("  {} secure={}", inst.uri(), inst.is_secure());
        }
    }
    Ok(())
}
