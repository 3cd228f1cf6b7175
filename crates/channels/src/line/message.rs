//! Encoding of reply payloads to Messaging API message objects.

use eatba_core::reply::{
    Action, CarouselCard, POSTBACK_COMMENT_KEY, QuickReplyOption, ReplyPayload,
};
use serde::Serialize;
use tracing::warn;

/// Alternative text shown in notifications for template messages.
pub const TEMPLATE_ALT_TEXT: &str = "TemplateMessage";

/// Platform limits. Messages exceeding any of them are rejected whole.
pub const MAX_QUICK_REPLY_ITEMS: usize = 13;
pub const MAX_CAROUSEL_COLUMNS: usize = 10;
pub const MAX_BUTTONS: usize = 4;
pub const MAX_POSTBACK_DATA_CHARS: usize = 300;
pub const MAX_DISPLAY_TEXT_CHARS: usize = 300;
pub const MAX_LABEL_CHARS: usize = 20;
pub const MAX_TITLE_CHARS: usize = 40;
pub const MAX_COLUMN_TEXT_CHARS: usize = 60;
pub const MAX_BUTTONS_TEXT_CHARS: usize = 160;
pub const MAX_CONFIRM_TEXT_CHARS: usize = 240;

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply_token: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        quick_reply: Option<QuickReply>,
    },
    #[serde(rename_all = "camelCase")]
    Template { alt_text: String, template: Template },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Template {
    #[serde(rename_all = "camelCase")]
    Buttons {
        thumbnail_image_url: String,
        title: String,
        text: String,
        actions: Vec<LineAction>,
    },
    Carousel { columns: Vec<Column> },
    Confirm { text: String, actions: Vec<LineAction> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub thumbnail_image_url: String,
    pub title: String,
    pub text: String,
    pub actions: Vec<LineAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LineAction {
    Uri { label: String, uri: String },
    #[serde(rename_all = "camelCase")]
    Postback {
        label: String,
        data: String,
        display_text: String,
    },
    Message { label: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReply {
    pub items: Vec<QuickReplyItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReplyItem {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub action: LineAction,
}

/// Postback data carrying `echoed` under the comment key.
///
/// Only the characters that are significant in form data are
/// percent-encoded; everything else travels as is, so multi-byte text costs
/// one character per character. Text that would push the data past
/// [`MAX_POSTBACK_DATA_CHARS`] is cut off.
pub fn postback_data(echoed: &str) -> String {
    let mut data = format!("{POSTBACK_COMMENT_KEY}=");
    let mut len = data.chars().count();

    for c in echoed.chars() {
        let reserved = matches!(c, '%' | '&' | '=' | '+');
        let width = if reserved { 3 } else { 1 };
        if len + width > MAX_POSTBACK_DATA_CHARS {
            warn!(
                chars = echoed.chars().count(),
                limit = MAX_POSTBACK_DATA_CHARS,
                "Postback data too long, truncating"
            );
            break;
        }
        if reserved {
            data.push_str(&format!("%{:02X}", c as u32));
        } else {
            data.push(c);
        }
        len += width;
    }
    data
}

fn clipped(text: &str, limit: usize, what: &str) -> String {
    if text.chars().count() > limit {
        warn!(chars = text.chars().count(), limit, "{what} too long, truncating");
        text.chars().take(limit).collect()
    } else {
        text.to_string()
    }
}

impl From<&Action> for LineAction {
    fn from(action: &Action) -> Self {
        match action {
            Action::OpenLink { label, url } => LineAction::Uri {
                label: clipped(label, MAX_LABEL_CHARS, "action label"),
                uri: url.clone(),
            },
            Action::SendFixedReply {
                label,
                display_text,
                echoed_text,
            } => LineAction::Postback {
                label: clipped(label, MAX_LABEL_CHARS, "action label"),
                data: postback_data(echoed_text),
                display_text: clipped(display_text, MAX_DISPLAY_TEXT_CHARS, "display text"),
            },
            Action::SendText { label, text } => LineAction::Message {
                label: clipped(label, MAX_LABEL_CHARS, "action label"),
                text: text.clone(),
            },
        }
    }
}

impl From<&QuickReplyOption> for QuickReplyItem {
    fn from(option: &QuickReplyOption) -> Self {
        QuickReplyItem {
            kind: "action",
            action: LineAction::Message {
                label: clipped(&option.label, MAX_LABEL_CHARS, "quick reply label"),
                text: option.value.clone(),
            },
        }
    }
}

impl From<&CarouselCard> for Column {
    fn from(card: &CarouselCard) -> Self {
        Column {
            thumbnail_image_url: card.image_url.clone(),
            title: clipped(&card.title, MAX_TITLE_CHARS, "column title"),
            text: clipped(&card.subtitle, MAX_COLUMN_TEXT_CHARS, "column text"),
            actions: card.actions.iter().map(LineAction::from).collect(),
        }
    }
}

fn capped<'a, T>(items: &'a [T], limit: usize, what: &str) -> &'a [T] {
    if items.len() > limit {
        warn!(count = items.len(), limit, "Too many {what}, truncating");
        &items[..limit]
    } else {
        items
    }
}

fn template(template: Template) -> Message {
    Message::Template {
        alt_text: TEMPLATE_ALT_TEXT.into(),
        template,
    }
}

/// Translate a reply payload to one LINE message.
pub fn encode(payload: &ReplyPayload) -> Message {
    match payload {
        ReplyPayload::Text { body } => Message::Text {
            text: body.clone(),
            quick_reply: None,
        },
        ReplyPayload::QuickReplyMenu { body, options } => Message::Text {
            text: body.clone(),
            quick_reply: Some(QuickReply {
                items: capped(options, MAX_QUICK_REPLY_ITEMS, "quick reply items")
                    .iter()
                    .map(QuickReplyItem::from)
                    .collect(),
            }),
        },
        ReplyPayload::ButtonMenu {
            title,
            body,
            image_url,
            actions,
        } => template(Template::Buttons {
            thumbnail_image_url: image_url.clone(),
            title: clipped(title, MAX_TITLE_CHARS, "buttons title"),
            text: clipped(body, MAX_BUTTONS_TEXT_CHARS, "buttons text"),
            actions: capped(actions, MAX_BUTTONS, "buttons")
                .iter()
                .map(LineAction::from)
                .collect(),
        }),
        ReplyPayload::Carousel { columns } => template(Template::Carousel {
            columns: capped(columns, MAX_CAROUSEL_COLUMNS, "carousel columns")
                .iter()
                .map(Column::from)
                .collect(),
        }),
        ReplyPayload::ConfirmMenu {
            body,
            confirm,
            cancel,
        } => template(Template::Confirm {
            text: clipped(body, MAX_CONFIRM_TEXT_CHARS, "confirm text"),
            actions: vec![confirm.into(), cancel.into()],
        }),
    }
}
