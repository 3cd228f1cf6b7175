//! HTTP gateway for Eatba.
//!
//! Exposes the LINE webhook endpoint, a health check, and the restaurant
//! photo directory.
//!
//! Built on Axum for high performance async HTTP.

pub mod callback;

use axum::extract::DefaultBodyLimit;
use axum::{Router, extract::State, response::Json, routing::{get, post}};
use eatba_bot::Bot;
use eatba_catalog::{CatalogLoader, IMAGE_ROUTE, ImageResolver, Sampler};
use eatba_channels::{ConsoleChannel, LineChannel};
use eatba_config::AppConfig;
use eatba_core::channel::ReplyChannel;
use eatba_memory::InMemorySessionStore;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Shared application state for the gateway.
pub struct GatewayState {
    /// The event dispatcher
    pub bot: Arc<Bot>,

    /// Where replies are delivered
    pub channel: Arc<dyn ReplyChannel>,

    /// LINE channel secret. `None` disables signature checks.
    pub channel_secret: Option<String>,
}

pub type SharedState = Arc<GatewayState>;

/// Router options that do not live in the shared state.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Directory served under `/static/images`, if any
    pub image_dir: Option<PathBuf>,

    /// Maximum accepted request body
    pub body_limit_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            image_dir: None,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl RouterOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            image_dir: config.images.serve.then(|| config.images.dir.clone()),
            body_limit_bytes: config.gateway.body_limit_bytes,
        }
    }
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState, options: &RouterOptions) -> Router {
    let mut router = Router::new()
        .route("/callback", post(callback::callback_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    if let Some(dir) = &options.image_dir {
        router = router.nest_service(IMAGE_ROUTE, ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(options.body_limit_bytes))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Load the catalog and assemble a bot from configuration.
pub fn bot_from_config(config: &AppConfig) -> eatba_core::Result<Bot> {
    let catalog = CatalogLoader::new(&config.catalog.data_dir).load()?;

    let mut sessions = InMemorySessionStore::new();
    if let Some(minutes) = config.sessions.idle_ttl_minutes {
        match i64::try_from(minutes).ok().and_then(chrono::Duration::try_minutes) {
            Some(ttl) => sessions = sessions.with_idle_ttl(ttl),
            None => warn!(minutes, "sessions.idle_ttl_minutes out of range, sessions never expire"),
        }
    }

    let images = ImageResolver::new(
        &config.images.dir,
        config.gateway.public_url.clone(),
        &config.images.fallback_url,
    );
    if config.gateway.public_url.is_none() {
        warn!("gateway.public_url is not set, restaurant cards will use the fallback image");
    }

    Ok(Bot::new(
        Arc::new(catalog),
        Arc::new(sessions),
        Arc::new(Sampler::new(config.bot.seed)),
        images,
    )
    .with_demo_replies(config.bot.demo_replies))
}

/// The reply channel configured by `config`: LINE when an access token is
/// present, the console otherwise.
pub fn channel_from_config(config: &AppConfig) -> eatba_core::Result<Arc<dyn ReplyChannel>> {
    match &config.line.access_token {
        Some(token) => {
            let channel = LineChannel::new(
                &config.line.api_base,
                token,
                Duration::from_secs(config.line.timeout_secs),
            )?;
            Ok(Arc::new(channel))
        }
        None => {
            warn!("No LINE access token configured, replies go to the log (dry run)");
            Ok(Arc::new(ConsoleChannel::new()))
        }
    }
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let bot = Arc::new(bot_from_config(&config)?);
    let channel = channel_from_config(&config)?;
    if config.line.channel_secret.is_none() {
        warn!("No LINE channel secret configured, webhook signatures are not checked");
    }

    let state = Arc::new(GatewayState {
        bot,
        channel,
        channel_secret: config.line.channel_secret.clone(),
    });
    let app = build_router(state, &RouterOptions::from_config(&config));

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    restaurants: usize,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        restaurants: state.bot.catalog().restaurant_count(),
    })
}
