//! Inbound events: what the transport hands to the bot.
//!
//! Events arrive already signature-verified. Each one carries the reply
//! token the transport needs to answer it.

use serde::{Deserialize, Serialize};

/// All inbound events the bot understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InboundEvent {
    /// The user typed a text message
    Text {
        user_id: String,
        reply_token: String,
        text: String,
    },

    /// The user added the bot as a friend
    Follow { reply_token: String },

    /// The user tapped a postback button
    Postback { reply_token: String, data: String },

    /// Anything else (stickers, images, unfollow, ...)
    Unsupported { kind: String },
}

impl InboundEvent {
    /// The reply token, when the event can be answered.
    pub fn reply_token(&self) -> Option<&str> {
        match self {
            InboundEvent::Text { reply_token, .. }
            | InboundEvent::Follow { reply_token }
            | InboundEvent::Postback { reply_token, .. } => Some(reply_token),
            InboundEvent::Unsupported { .. } => None,
        }
    }

    /// Short variant name, for logging.
    pub fn kind(&self) -> &str {
        match self {
            InboundEvent::Text { .. } => "text",
            InboundEvent::Follow { .. } => "follow",
            InboundEvent::Postback { .. } => "postback",
            InboundEvent::Unsupported { kind } => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_token_by_variant() {
        let text = InboundEvent::Text {
            user_id: "U1".into(),
            reply_token: "tok".into(),
            text: "hi".into(),
        };
        assert_eq!(text.reply_token(), Some("tok"));
        assert_eq!(text.kind(), "text");

        let other = InboundEvent::Unsupported {
            kind: "sticker".into(),
        };
        assert_eq!(other.reply_token(), None);
        assert_eq!(other.kind(), "sticker");
    }
}
