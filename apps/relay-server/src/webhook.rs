//! Slack Events API receiver.
//!
//! Verifies the signing secret, answers URL verification challenges, and welcomes new members
//! on `team_join`. Once the signature checks out the webhook is always acknowledged with 200;
//! join sends run on a spawned task after the ack and their failures are only logged.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use relay_core::{InboundEvent, messages};
use relay_telemetry::record_webhook_rejected;
use security::RETRY_NUM_HEADER;
use serde::Deserialize;
use tracing::Instrument;

use crate::dispatch::deliver;
use crate::http::AppState;

#[derive(Debug, Deserialize)]
struct SlackEnvelope {
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    challenge: Option<String>,
    #[serde(default)]
    event_id: Option<String>,
    #[serde(default)]
    event: Option<SlackEvent>,
}

#[derive(Debug, Deserialize, Default)]
struct SlackEvent {
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    user: Option<SlackUser>,
}

/// `team_join` carries a full user object; most other events carry a bare id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SlackUser {
    Id(String),
    Object {
        #[serde(default)]
        id: Option<String>,
    },
}

impl SlackUser {
    fn id(&self) -> Option<&str> {
        match self {
            SlackUser::Id(id) => Some(id.as_str()),
            SlackUser::Object { id } => id.as_deref(),
        }
    }
}

pub async fn handle_events(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(err) = state.verifier.verify(&headers, &body) {
        tracing::warn!(reason = err.reason(), error = %err, "rejected slack webhook");
        record_webhook_rejected(err.reason());
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let envelope: SlackEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::warn!(error = %err, "slack payload parse error");
            record_webhook_rejected("bad_payload");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match envelope.r#type.as_deref() {
        Some("url_verification") => {
            let challenge = envelope.challenge.unwrap_or_default();
            return (StatusCode::OK, challenge).into_response();
        }
        Some("event_callback") => {}
        other => {
            tracing::debug!(envelope_type = ?other, "ignoring slack envelope");
            return StatusCode::OK.into_response();
        }
    }

    if let Some(retry) = headers.get(RETRY_NUM_HEADER) {
        tracing::info!(
            retry_num = retry.to_str().unwrap_or("?"),
            event_id = envelope.event_id.as_deref().unwrap_or(""),
            "skipping slack redelivery"
        );
        return StatusCode::OK.into_response();
    }

    let Some(event) = envelope.event.and_then(to_inbound_event) else {
        return StatusCode::OK.into_response();
    };

    if event.is_join() {
        // Slack wants the ack within 3s; the sends run after it.
        tokio::spawn(handle_join(state, event).in_current_span());
    } else {
        tracing::debug!(event_type = %event.event_type, "ignoring slack event");
    }

    StatusCode::OK.into_response()
}

fn to_inbound_event(event: SlackEvent) -> Option<InboundEvent> {
    let event_type = event.r#type?;
    let user_id = event
        .user
        .as_ref()
        .and_then(SlackUser::id)
        .map(str::trim)
        .filter(|id| !id.is_empty());
    match user_id {
        Some(user_id) => Some(InboundEvent::new(event_type, user_id)),
        None => {
            tracing::warn!(event_type = %event_type, "slack event without user id");
            None
        }
    }
}

/// Sends the onboarding DM, then the channel announcement.
///
/// The announcement is attempted even when the DM fails.
pub async fn handle_join(state: Arc<AppState>, event: InboundEvent) {
    let request = match event.to_send_request() {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "join event rejected");
            return;
        }
    };
    tracing::info!(user_id = %request.user_id, "new member joined");

    let _ = deliver(&state, "onboarding_dm", messages::onboarding_dm(&request.user_id)).await;
    let _ = deliver(
        &state,
        "join_announcement",
        messages::join_announcement(&state.welcome_channel, &request.user_id),
    )
    .await;
}
