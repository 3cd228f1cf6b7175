//! `eatba status`: Show configuration and catalog status.

use eatba_catalog::CatalogLoader;
use eatba_core::catalog::MealTime;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = super::config_path(config_path);
    let config = super::load_config(config_path)?;

    println!("🍜 Eatba Status");
    println!("==============");
    println!("  Config file:  {}", path.display());
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "  Public URL:   {}",
        config.gateway.public_url.as_deref().unwrap_or("(not set, fallback images)")
    );
    println!("  Data dir:     {}", config.catalog.data_dir.display());
    println!("  Image dir:    {}", config.images.dir.display());
    let line = if config.has_line_credentials() {
        "configured"
    } else {
        "not configured"
    };
    println!("  LINE:         {line}");
    println!(
        "  Sessions:     {}",
        match config.sessions.idle_ttl_minutes {
            Some(minutes) => format!("expire after {minutes} idle minutes"),
            None => "kept until restart".into(),
        }
    );
    println!("  Demo replies: {}", if config.bot.demo_replies { "enabled" } else { "disabled" });

    println!("\n  Catalog:");
    let loader = CatalogLoader::new(&config.catalog.data_dir);
    for meal in MealTime::ALL {
        match loader.load_partition(meal) {
            Ok(groups) => println!(
                "    {:<16} {:>4} restaurants in {:>2} districts",
                meal.hashtag(),
                groups.restaurant_count(),
                groups.len()
            ),
            Err(e) => println!("    {:<16} ❌ {e}", meal.hashtag()),
        }
    }

    Ok(())
}
