//! `capstan serve` — Start the HTTP API server.

use anyhow::Context;
use capstan_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::load().context("Failed to load config")?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("Capstan Gateway");
    println!("  Listening:  {}:{}", config.gateway.host, config.gateway.port);
    println!("  Provider:   {}", config.provider);
    println!("  Offline:    {}", config.force_offline);

    capstan_gateway::start(config)
        .await
        .map_err(|e| anyhow::anyhow!("Gateway failed: {e}"))?;

    Ok(())
}
