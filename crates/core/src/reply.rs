//! Reply payload domain types.
//!
//! A `ReplyPayload` is the platform-neutral description of one outbound
//! message. Channel adapters translate it to their wire format (for LINE:
//! text messages, quick replies, and button/carousel/confirm templates).

use serde::{Deserialize, Serialize};

/// Form key carrying the echoed text of a `SendFixedReply` postback.
pub const POSTBACK_COMMENT_KEY: &str = "comment";

/// A tappable action attached to a menu, card, or quick reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Open a URL in the user's browser.
    OpenLink { label: String, url: String },

    /// Send a postback; the bot answers with `echoed_text` verbatim.
    SendFixedReply {
        label: String,
        /// Text shown in the chat as if typed by the user
        display_text: String,
        echoed_text: String,
    },

    /// Type `text` on the user's behalf, as a normal text message.
    SendText { label: String, text: String },
}

impl Action {
    pub fn open_link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::OpenLink {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn fixed_reply(
        label: impl Into<String>,
        display_text: impl Into<String>,
        echoed_text: impl Into<String>,
    ) -> Self {
        Self::SendFixedReply {
            label: label.into(),
            display_text: display_text.into(),
            echoed_text: echoed_text.into(),
        }
    }

    pub fn send_text(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::SendText {
            label: label.into(),
            text: text.into(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Action::OpenLink { label, .. }
            | Action::SendFixedReply { label, .. }
            | Action::SendText { label, .. } => label,
        }
    }
}

/// One quick-reply chip: `label` is shown, `value` is sent when tapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReplyOption {
    pub label: String,
    pub value: String,
}

impl QuickReplyOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A single card of a carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselCard {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub actions: Vec<Action>,
}

impl CarouselCard {
    /// A restaurant card. Actions are ordered address, phone, review.
    pub fn restaurant(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        image_url: impl Into<String>,
        address_action: Action,
        phone_action: Action,
        review_action: Action,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            image_url: image_url.into(),
            actions: vec![address_action, phone_action, review_action],
        }
    }
}

/// One outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyPayload {
    /// Plain text.
    Text { body: String },

    /// Image header, title, body and up to four buttons.
    ButtonMenu {
        title: String,
        body: String,
        image_url: String,
        actions: Vec<Action>,
    },

    /// Text with tappable suggested replies.
    QuickReplyMenu {
        body: String,
        options: Vec<QuickReplyOption>,
    },

    /// Side-by-side cards. Never empty.
    Carousel { columns: Vec<CarouselCard> },

    /// Yes/no question with two buttons.
    ConfirmMenu {
        body: String,
        confirm: Action,
        cancel: Action,
    },
}

impl ReplyPayload {
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text { body: body.into() }
    }

    /// Short variant name, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ReplyPayload::Text { .. } => "text",
            ReplyPayload::ButtonMenu { .. } => "button_menu",
            ReplyPayload::QuickReplyMenu { .. } => "quick_reply_menu",
            ReplyPayload::Carousel { .. } => "carousel",
            ReplyPayload::ConfirmMenu { .. } => "confirm_menu",
        }
    }
}
