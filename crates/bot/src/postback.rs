//! Postback handling.
//!
//! Fixed-reply buttons carry their answer in the postback data as a form
//! field (`comment=<text>`). The bot echoes it back verbatim.

use eatba_core::reply::{POSTBACK_COMMENT_KEY, ReplyPayload};
use tracing::debug;

/// Reply for postbacks that carry no comment.
pub const POSTBACK_FALLBACK: &str = "Get PostBack Event!";

/// The echoed text carried by postback data, if any.
///
/// Blank values are ignored; when the key repeats, the last one wins.
pub fn comment_of(data: &str) -> Option<String> {
    let fields: Vec<(String, String)> = match serde_urlencoded::from_str(data) {
        Ok(fields) => fields,
        Err(e) => {
            debug!(error = %e, "Unparseable postback data");
            return None;
        }
    };

    fields
        .into_iter()
        .filter(|(key, value)| key == POSTBACK_COMMENT_KEY && !value.is_empty())
        .map(|(_, value)| value)
        .last()
}

/// Answer a postback.
pub fn handle_postback(data: &str) -> ReplyPayload {
    match comment_of(data) {
        Some(comment) => ReplyPayload::text(comment),
        None => ReplyPayload::text(POSTBACK_FALLBACK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(payload: ReplyPayload) -> String {
        match payload {
            ReplyPayload::Text { body } => body,
            other => panic!("expected text, got {}", other.kind()),
        }
    }

    #[test]
    fn echoes_percent_encoded_comment() {
        assert_eq!(
            body(handle_postback("comment=Joe's%20Diner的餐廳評價：Great!")),
            "Joe's Diner的餐廳評價：Great!"
        );
    }

    #[test]
    fn plus_decodes_to_space() {
        assert_eq!(body(handle_postback("comment=a+b")), "a b");
    }

    #[test]
    fn missing_or_blank_comment_falls_back() {
        assert_eq!(body(handle_postback("")), POSTBACK_FALLBACK);
        assert_eq!(body(handle_postback("action=buy&itemid=1")), POSTBACK_FALLBACK);
        assert_eq!(body(handle_postback("comment=")), POSTBACK_FALLBACK);
    }

    #[test]
    fn last_non_empty_comment_wins() {
        assert_eq!(comment_of("comment=a&comment=b").as_deref(), Some("b"));
        assert_eq!(comment_of("comment=a&comment=").as_deref(), Some("a"));
        assert_eq!(comment_of("x=1&comment=z&y=2").as_deref(), Some("z"));
    }

    #[test]
    fn encoded_data_round_trips() {
        let echoed = "老店の聯絡電話： 04-2222 & more=1";
        let data = serde_urlencoded::to_string([(POSTBACK_COMMENT_KEY, echoed)]).unwrap();
        assert_eq!(body(handle_postback(&data)), echoed);
    }
}
