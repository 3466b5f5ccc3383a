use std::time::Duration;

use anyhow::Result;

use crate::config;
use crate::gateway::GatewayContext;

/// Loads configuration, prints it, and performs one lightweight upstream
/// request to report reachability and circuit breaker state — without
/// starting a long-lived transport.
pub async fn run() -> Result<()> {
    let settings = config::load_settings();
    println!("{}", serde_json::to_string_pretty(&settings)?);

    let ctx = GatewayContext::new(settings);
    let ttl = Duration::from_secs(ctx.settings.cache_metadata_ttl_secs);

    match ctx.client.get_metadata("keywords", ttl).await {
        Ok(_) => println!("upstream: reachable (GET /keywords ok)"),
        Err(e) => println!("upstream: unreachable ({e})"),
    }

    println!("circuit breaker: {:?}", ctx.client.breaker_state().await);
    Ok(())
}
