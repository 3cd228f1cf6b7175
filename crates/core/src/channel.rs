//! ReplyChannel trait: the abstraction over the messaging platform.
//!
//! A ReplyChannel delivers one reply payload in answer to an inbound event,
//! identified by the event's reply token. From the bot's point of view the
//! delivery is fire-and-forget: failures are logged by the caller and never
//! fed back into routing.

use crate::error::ChannelError;
use crate::reply::ReplyPayload;
use async_trait::async_trait;

/// The core ReplyChannel trait.
///
/// Implementations handle platform-specific message encoding and
/// authentication.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Human-readable channel name (e.g., "line", "console").
    fn name(&self) -> &str;

    /// Deliver `payload` as the reply to the event carrying `reply_token`.
    async fn reply(
        &self,
        reply_token: &str,
        payload: &ReplyPayload,
    ) -> std::result::Result<(), ChannelError>;

    /// Health check: is the channel configured and operational?
    async fn health_check(&self) -> std::result::Result<bool, ChannelError> {
        Ok(true)
    }
}
