//! `eatba doctor`: Diagnose configuration and data files.

use eatba_catalog::CatalogLoader;
use eatba_config::AppConfig;
use eatba_core::catalog::MealTime;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Eatba Doctor: System Diagnostics");
    println!("====================================\n");

    let mut issues = 0;

    // Check config
    let path = super::config_path(config_path);
    if !path.exists() {
        println!("  ⚠️  No config file at {}, run `eatba init` (using defaults)", path.display());
        issues += 1;
    }

    let config = match AppConfig::load_with_env(&path) {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            println!("\n  ⚠️  Fix the configuration before running other checks.");
            return Ok(());
        }
    };

    // Check datasets
    let loader = CatalogLoader::new(&config.catalog.data_dir);
    for meal in MealTime::ALL {
        match loader.load_partition(meal) {
            Ok(groups) if groups.is_empty() => {
                println!("  ⚠️  {} has no usable rows", loader.dataset_path(meal).display());
                issues += 1;
            }
            Ok(groups) => println!(
                "  ✅ {} ({} restaurants)",
                loader.dataset_path(meal).display(),
                groups.restaurant_count()
            ),
            Err(e) => {
                println!("  ❌ {e}");
                issues += 1;
            }
        }
    }

    // Check images
    if config.images.dir.is_dir() {
        println!("  ✅ Image directory {}", config.images.dir.display());
    } else {
        println!(
            "  ⚠️  No image directory at {}, cards will use the fallback image",
            config.images.dir.display()
        );
        issues += 1;
    }

    if config.gateway.public_url.is_none() {
        println!("  ⚠️  gateway.public_url not set, cards will use the fallback image");
        issues += 1;
    }

    // Check LINE credentials
    if config.line.channel_secret.is_some() {
        println!("  ✅ LINE channel secret configured");
    } else {
        println!("  ⚠️  No channel secret, set LINEBOT_SECRET_KEY (signatures unchecked)");
        issues += 1;
    }
    if config.line.access_token.is_some() {
        println!("  ✅ LINE access token configured");
    } else {
        println!("  ⚠️  No access token, set LINEBOT_ACCESS_TOKEN (replies are logged only)");
        issues += 1;
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
