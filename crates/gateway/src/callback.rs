//! LINE webhook endpoint.

use crate::SharedState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use eatba_channels::line::{SIGNATURE_HEADER, check_signature, decode_events};
use tracing::{debug, error, info, warn};

/// `POST /callback`: verify, decode, and answer every event in the body.
///
/// Reply delivery failures are logged and never change the response.
pub async fn callback_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, StatusCode> {
    if let Some(secret) = state.channel_secret.as_deref() {
        let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
        check_signature(secret, &body, signature).map_err(|e| {
            info!(error = %e, "Rejecting webhook request");
            StatusCode::BAD_REQUEST
        })?;
    }

    debug!(body = %String::from_utf8_lossy(&body), "Request body");

    let events = decode_events(&body).map_err(|e| {
        warn!(error = %e, "Rejecting webhook body");
        StatusCode::BAD_REQUEST
    })?;

    for event in &events {
        let Some(payload) = state.bot.handle_event(event).await else {
            continue;
        };
        let Some(reply_token) = event.reply_token() else {
            continue;
        };

        if let Err(e) = state.channel.reply(reply_token, &payload).await {
            error!(
                channel = state.channel.name(),
                event = event.kind(),
                error = %e,
                "Reply delivery failed"
            );
        }
    }

    Ok("OK")
}
