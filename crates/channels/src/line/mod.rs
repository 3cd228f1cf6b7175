//! LINE Messaging API channel.
//!
//! Inbound: [`signature`] validates the `X-Line-Signature` header and
//! [`webhook`] decodes the request body into inbound events.
//! Outbound: [`message`] encodes reply payloads and [`LineChannel`] posts
//! them to the reply endpoint.

pub mod message;
pub mod signature;
pub mod webhook;

use async_trait::async_trait;
use eatba_core::channel::ReplyChannel;
use eatba_core::error::ChannelError;
use eatba_core::reply::ReplyPayload;
use std::time::Duration;
use tracing::{debug, warn};

pub use message::{ReplyRequest, encode};
pub use signature::{SIGNATURE_HEADER, check_signature, verify_signature};
pub use webhook::decode_events;

/// Default Messaging API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.line.me";

const REPLY_PATH: &str = "/v2/bot/message/reply";

/// Reply client for the LINE Messaging API.
pub struct LineChannel {
    api_base: String,
    access_token: String,
    client: reqwest::Client,
}

impl LineChannel {
    /// Create a LINE channel.
    pub fn new(
        api_base: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChannelError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            client,
        })
    }

    /// Full URL of the reply endpoint.
    pub fn reply_url(&self) -> String {
        format!("{}{REPLY_PATH}", self.api_base)
    }
}

#[async_trait]
impl ReplyChannel for LineChannel {
    fn name(&self) -> &str {
        "line"
    }

    async fn reply(&self, reply_token: &str, payload: &ReplyPayload) -> Result<(), ChannelError> {
        let body = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages: vec![encode(payload)],
        };

        debug!(kind = payload.kind(), "Sending LINE reply");

        let response = self
            .client
            .post(self.reply_url())
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChannelError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, "LINE reply rejected");
            return Err(ChannelError::DeliveryFailed {
                channel: "line".into(),
                reason: format!("HTTP {}: {error_body}", status.as_u16()),
            });
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, ChannelError> {
        Ok(!self.access_token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>;

    async fn mock_api(status: StatusCode) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let sink = captured.clone();
        let app = Router::new().route(
            REPLY_PATH,
            post(move |headers: HeaderMap, body: String| {
                let sink = sink.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    sink.lock()
                        .unwrap()
                        .push((auth, serde_json::from_str(&body).unwrap()));
                    (status, "{}")
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), captured)
    }

    #[test]
    fn reply_url_trims_slash() {
        let ch = LineChannel::new("https://api.line.me/", "t", Duration::from_secs(1)).unwrap();
        assert_eq!(ch.reply_url(), "https://api.line.me/v2/bot/message/reply");
        assert_eq!(ch.name(), "line");
    }

    #[tokio::test]
    async fn posts_reply_with_bearer_token() {
        let (base, captured) = mock_api(StatusCode::OK).await;
        let ch = LineChannel::new(base, "secret-token", Duration::from_secs(5)).unwrap();

        ch.reply("reply-1", &ReplyPayload::text("嗨")).await.unwrap();

        let calls = captured.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.as_deref(), Some("Bearer secret-token"));
        assert_eq!(calls[0].1["replyToken"], "reply-1");
        assert_eq!(calls[0].1["messages"][0]["text"], "嗨");
    }

    #[tokio::test]
    async fn non_success_is_delivery_failure() {
        let (base, _) = mock_api(StatusCode::BAD_REQUEST).await;
        let ch = LineChannel::new(base, "t", Duration::from_secs(5)).unwrap();

        let err = ch.reply("r", &ReplyPayload::text("x")).await.unwrap_err();
        assert!(matches!(err, ChannelError::DeliveryFailed { .. }));
    }

    #[tokio::test]
    async fn health_requires_token() {
        let ch = LineChannel::new(DEFAULT_API_BASE, "", Duration::from_secs(1)).unwrap();
        assert!(!ch.health_check().await.unwrap());
    }
}
