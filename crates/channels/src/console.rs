//! Console channel: replies go to the log (and optionally stdout).
//!
//! Used for dry runs when no LINE access token is configured, by the
//! interactive `eatba chat` session, and by tests. Only a recording channel
//! keeps the replies it delivers.

use async_trait::async_trait;
use eatba_core::channel::ReplyChannel;
use eatba_core::error::ChannelError;
use eatba_core::reply::ReplyPayload;
use std::sync::Mutex;
use tracing::info;

/// A reply channel that logs replies instead of sending them.
pub struct ConsoleChannel {
    print: bool,
    sent: Option<Mutex<Vec<(String, ReplyPayload)>>>,
}

impl ConsoleChannel {
    /// A silent channel: replies are logged only.
    pub fn new() -> Self {
        Self {
            print: false,
            sent: None,
        }
    }

    /// Also print each reply to stdout as pretty JSON.
    pub fn printing() -> Self {
        Self {
            print: true,
            ..Self::new()
        }
    }

    /// Keep every delivered reply for later inspection.
    pub fn recording() -> Self {
        Self {
            sent: Some(Mutex::new(Vec::new())),
            ..Self::new()
        }
    }

    /// All replies recorded so far, as `(reply_token, payload)`.
    ///
    /// Always empty unless the channel was built with [`ConsoleChannel::recording`].
    pub fn sent(&self) -> Vec<(String, ReplyPayload)> {
        self.sent
            .as_ref()
            .map(|sent| sent.lock().unwrap_or_else(|e| e.into_inner()).clone())
            .unwrap_or_default()
    }

    /// Remove and return the recorded replies.
    pub fn take(&self) -> Vec<(String, ReplyPayload)> {
        self.sent
            .as_ref()
            .map(|sent| std::mem::take(&mut *sent.lock().unwrap_or_else(|e| e.into_inner())))
            .unwrap_or_default()
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyChannel for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
    }

    async fn reply(&self, reply_token: &str, payload: &ReplyPayload) -> Result<(), ChannelError> {
        info!(reply_token = %reply_token, kind = payload.kind(), "Console reply");

        if self.print {
            let json = serde_json::to_string_pretty(payload)
                .map_err(|e| ChannelError::InvalidPayload(e.to_string()))?;
            println!("{json}");
        }

        if let Some(sent) = &self.sent {
            sent.lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((reply_token.to_string(), payload.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_replies_in_order() {
        let ch = ConsoleChannel::recording();
        ch.reply("a", &ReplyPayload::text("one")).await.unwrap();
        ch.reply("b", &ReplyPayload::text("two")).await.unwrap();

        let sent = ch.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], ("a".to_string(), ReplyPayload::text("one")));
        assert_eq!(sent[1].0, "b");
    }

    #[tokio::test]
    async fn take_drains() {
        let ch = ConsoleChannel::recording();
        ch.reply("a", &ReplyPayload::text("x")).await.unwrap();
        assert_eq!(ch.take().len(), 1);
        assert!(ch.sent().is_empty());
        assert_eq!(ch.name(), "console");
        assert!(ch.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn dry_run_channel_keeps_nothing() {
        let ch = ConsoleChannel::new();
        for i in 0..1_000 {
            ch.reply(&format!("t{i}"), &ReplyPayload::text("x")).await.unwrap();
        }
        assert!(ch.sent().is_empty());
        assert!(ch.take().is_empty());

        let printing = ConsoleChannel::printing();
        printing.reply("a", &ReplyPayload::text("x")).await.unwrap();
        assert!(printing.sent().is_empty());
    }
}
