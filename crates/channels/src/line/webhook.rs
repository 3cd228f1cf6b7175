//! Webhook request body decoding.

use eatba_core::error::ChannelError;
use eatba_core::event::InboundEvent;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WebhookBody {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookEvent {
    #[serde(rename = "type")]
    kind: String,
    reply_token: Option<String>,
    source: Option<EventSource>,
    message: Option<EventMessage>,
    postback: Option<EventPostback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventSource {
    user_id: Option<String>,
    group_id: Option<String>,
    room_id: Option<String>,
}

impl EventSource {
    fn id(self) -> Option<String> {
        self.user_id.or(self.group_id).or(self.room_id)
    }
}

#[derive(Debug, Deserialize)]
struct EventMessage {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventPostback {
    #[serde(default)]
    data: String,
}

/// Decode a webhook body into inbound events, in delivery order.
///
/// Malformed JSON is an error; events the bot does not handle become
/// `InboundEvent::Unsupported`.
pub fn decode_events(body: &[u8]) -> Result<Vec<InboundEvent>, ChannelError> {
    let body: WebhookBody =
        serde_json::from_slice(body).map_err(|e| ChannelError::InvalidPayload(e.to_string()))?;
    Ok(body.events.into_iter().map(to_inbound).collect())
}

fn to_inbound(event: WebhookEvent) -> InboundEvent {
    let WebhookEvent {
        kind,
        reply_token,
        source,
        message,
        postback,
    } = event;

    let Some(reply_token) = reply_token else {
        return InboundEvent::Unsupported { kind };
    };

    match kind.as_str() {
        "message" => match message {
            Some(EventMessage {
                kind: message_kind,
                text: Some(text),
            }) if message_kind == "text" => InboundEvent::Text {
                user_id: source.and_then(EventSource::id).unwrap_or_default(),
                reply_token,
                text,
            },
            Some(other) => InboundEvent::Unsupported {
                kind: format!("message/{}", other.kind),
            },
            None => InboundEvent::Unsupported { kind },
        },
        "follow" => InboundEvent::Follow { reply_token },
        "postback" => InboundEvent::Postback {
            reply_token,
            data: postback.map(|p| p.data).unwrap_or_default(),
        },
        _ => InboundEvent::Unsupported { kind },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_text_follow_postback() {
        let body = r##"{
            "destination": "Uxxx",
            "events": [
                {"type":"message","replyToken":"r1","source":{"type":"user","userId":"U1"},
                 "message":{"id":"1","type":"text","text":"#西區"}},
                {"type":"follow","replyToken":"r2","source":{"type":"user","userId":"U2"}},
                {"type":"postback","replyToken":"r3","source":{"type":"user","userId":"U3"},
                 "postback":{"data":"comment=hi"}}
            ]
        }"##;

        let events = decode_events(body.as_bytes()).unwrap();
        assert_eq!(
            events,
            vec![
                InboundEvent::Text {
                    user_id: "U1".into(),
                    reply_token: "r1".into(),
                    text: "#西區".into(),
                },
                InboundEvent::Follow {
                    reply_token: "r2".into()
                },
                InboundEvent::Postback {
                    reply_token: "r3".into(),
                    data: "comment=hi".into(),
                },
            ]
        );
    }

    #[test]
    fn group_source_falls_back_to_group_id() {
        let body = br#"{"events":[{"type":"message","replyToken":"r","source":{"type":"group","groupId":"G1"},"message":{"type":"text","text":"hi"}}]}"#;
        let events = decode_events(body).unwrap();
        assert!(matches!(&events[0], InboundEvent::Text { user_id, .. } if user_id == "G1"));
    }

    #[test]
    fn other_events_are_unsupported() {
        let body = br#"{"events":[
            {"type":"unfollow","source":{"type":"user","userId":"U1"}},
            {"type":"message","replyToken":"r","message":{"type":"sticker","packageId":"1"}},
            {"type":"join","replyToken":"r"}
        ]}"#;
        let kinds: Vec<_> = decode_events(body)
            .unwrap()
            .iter()
            .map(|e| e.kind().to_string())
            .collect();
        assert_eq!(kinds, vec!["unfollow", "message/sticker", "join"]);
    }

    #[test]
    fn empty_and_verification_bodies() {
        assert!(decode_events(br#"{"destination":"U","events":[]}"#).unwrap().is_empty());
        assert!(decode_events(b"{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = decode_events(b"{not json").unwrap_err();
        assert!(matches!(err, ChannelError::InvalidPayload(_)));
    }
}
