//! `eatba serve`: Start the webhook server.

use std::path::Path;

pub async fn run(
    config_path: Option<&Path>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🍜 Eatba Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Webhook:   POST /callback");
    println!(
        "   Replies:   {}",
        if config.line.access_token.is_some() { "LINE" } else { "console (dry run)" }
    );

    eatba_gateway::start(config).await?;

    Ok(())
}
