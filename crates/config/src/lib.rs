//! Configuration loading, validation, and management for Eatba.
//!
//! Loads configuration from `~/.eatba/config.toml` (or an explicit path)
//! with environment variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.eatba/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// LINE Messaging API credentials
    #[serde(default)]
    pub line: LineConfig,

    /// Restaurant dataset locations
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Restaurant image store
    #[serde(default)]
    pub images: ImagesConfig,

    /// Session memory policy
    #[serde(default)]
    pub sessions: SessionsConfig,

    /// Bot behavior switches
    #[serde(default)]
    pub bot: BotConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Externally reachable base URL (e.g. `https://bot.example.com`),
    /// used to build image URLs. Without it the fallback image is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,

    /// Maximum accepted webhook body in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            public_url: None,
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LineConfig {
    /// Channel secret used to verify `X-Line-Signature`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_secret: Option<String>,

    /// Channel access token used for the reply API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Reply API request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.line.me".into()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_secret: None,
            access_token: None,
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineConfig")
            .field("channel_secret", &redact(&self.channel_secret))
            .field("access_token", &redact(&self.access_token))
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding `breakfast_rest.csv`, `lunch_rest.csv`, `dinner_rest.csv`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("taichungeatba")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Root of the `{district}_{name}` image folders
    #[serde(default = "default_image_dir")]
    pub dir: PathBuf,

    /// Whether the gateway serves `dir` under `/static/images`
    #[serde(default = "default_true")]
    pub serve: bool,

    /// Image used when a restaurant has no folder or an empty one
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("static/images")
}
fn default_fallback_url() -> String {
    "https://i.imgur.com/97LucO0.jpg".into()
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: default_image_dir(),
            serve: true,
            fallback_url: default_fallback_url(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Forget a user's meal selection after this many minutes without a
    /// selection or recommendation.
    /// Unset = sessions live for the whole process lifetime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_ttl_minutes: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Answer `sample` demo keywords instead of staying silent
    #[serde(default)]
    pub demo_replies: bool,

    /// Fixed RNG seed for restaurant and image sampling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.eatba/config.toml).
    ///
    /// Environment variables override the file:
    /// - `LINEBOT_SECRET_KEY` / `EATBA_CHANNEL_SECRET`
    /// - `LINEBOT_ACCESS_TOKEN` / `EATBA_ACCESS_TOKEN`
    /// - `EATBA_PUBLIC_URL`
    /// - `EATBA_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with_env(&config_path)
    }

    /// Load from `path`, then apply environment overrides and validate.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (injected for tests).
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(secret) =
            lookup("EATBA_CHANNEL_SECRET").or_else(|| lookup("LINEBOT_SECRET_KEY"))
        {
            self.line.channel_secret = Some(secret);
        }

        if let Some(token) =
            lookup("EATBA_ACCESS_TOKEN").or_else(|| lookup("LINEBOT_ACCESS_TOKEN"))
        {
            self.line.access_token = Some(token);
        }

        if let Some(url) = lookup("EATBA_PUBLIC_URL") {
            self.gateway.public_url = Some(url);
        }

        if let Some(port) = lookup("EATBA_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("EATBA_PORT is not a valid port: {port}"))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".eatba")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.fallback_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "images.fallback_url must not be empty".into(),
            ));
        }

        if let Some(url) = &self.gateway.public_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError(format!(
                    "gateway.public_url must start with http:// or https://, got {url}"
                )));
            }
        }

        if self.gateway.body_limit_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.body_limit_bytes must be > 0".into(),
            ));
        }

        if self.sessions.idle_ttl_minutes == Some(0) {
            return Err(ConfigError::ValidationError(
                "sessions.idle_ttl_minutes must be > 0 when set".into(),
            ));
        }

        Ok(())
    }

    /// Whether both LINE credentials are present.
    pub fn has_line_credentials(&self) -> bool {
        self.line.channel_secret.is_some() && self.line.access_token.is_some()
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.images.fallback_url, "https://i.imgur.com/97LucO0.jpg");
        assert!(config.sessions.idle_ttl_minutes.is_none());
        assert!(!config.bot.demo_replies);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.gateway.port, config.gateway.port);
        assert_eq!(parsed.catalog.data_dir, config.catalog.data_dir);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let toml_str = r#"
[gateway]
port = 8080
public_url = "https://bot.example.com"

[bot]
seed = 42
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.bot.seed, Some(42));
        assert_eq!(config.images.dir, PathBuf::from("static/images"));
    }

    #[test]
    fn invalid_public_url_rejected() {
        let mut config = AppConfig::default();
        config.gateway.public_url = Some("bot.example.com".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.sessions.idle_ttl_minutes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.gateway.port, 5000);
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\ndata_dir = \"/srv/data\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.catalog.data_dir, PathBuf::from("/srv/data"));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway\nport = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LINEBOT_SECRET_KEY", "secret"),
            ("EATBA_ACCESS_TOKEN", "token"),
            ("LINEBOT_ACCESS_TOKEN", "ignored"),
            ("EATBA_PORT", "9000"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.line.channel_secret.as_deref(), Some("secret"));
        assert_eq!(config.line.access_token.as_deref(), Some("token"));
        assert_eq!(config.gateway.port, 9000);
        assert!(config.has_line_credentials());
    }

    #[test]
    fn bad_port_env_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_env(|key| (key == "EATBA_PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut config = AppConfig::default();
        config.line.channel_secret = Some("super-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("5000"));
        assert!(toml_str.contains("taichungeatba"));
    }
}
