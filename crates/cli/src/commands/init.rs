//! `eatba init`: Write a default config file.

use eatba_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = super::config_path(config_path);

    println!("🍜 Eatba First-Time Setup");
    println!("===========================\n");

    if path.exists() {
        println!("⚠️  Config already exists at: {}", path.display());
        println!("   Edit it manually or delete and re-run init.\n");
        return Ok(());
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            println!("✅ Created config directory: {}", dir.display());
        }
    }

    std::fs::write(&path, AppConfig::default_toml())?;
    println!("✅ Created config at: {}", path.display());
    println!("\n📝 Next steps:");
    println!("   1. Set LINEBOT_SECRET_KEY and LINEBOT_ACCESS_TOKEN (or edit [line])");
    println!("   2. Set gateway.public_url to the HTTPS address LINE reaches you at");
    println!("   3. Run: eatba doctor");
    println!("   4. Run: eatba serve\n");

    Ok(())
}
