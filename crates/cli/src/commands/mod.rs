pub mod chat;
pub mod doctor;
pub mod init;
pub mod serve;
pub mod status;

use eatba_config::AppConfig;
use std::path::{Path, PathBuf};

/// The config file in effect: `--config` or the default location.
pub fn config_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

/// Load configuration with environment overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = AppConfig::load_with_env(&config_path(path))
        .map_err(|e| format!("Failed to load config: {e}"))?;
    Ok(config)
}
