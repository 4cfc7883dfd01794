//! Operator-triggered sends. Each handler validates its input, then calls the sender once.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use relay_core::{SendRequest, messages};
use serde::Deserialize;

use crate::dispatch::deliver;
use crate::error::{ApiError, MessageBody};
use crate::http::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
}

pub async fn send_welcome_message(
    State(state): State<Arc<AppState>>,
    body: Result<Json<WelcomeRequest>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(body) = body?;
    let request = SendRequest::welcome(body.user_id.as_deref())?;

    deliver(&state, "manual_welcome", messages::manual_welcome(&request.user_id))
        .await
        .map_err(|err| ApiError::upstream("Slack message failed", err))?;

    Ok(Json(MessageBody {
        message: "Welcome message sent!",
    }))
}

pub async fn send_channel_message(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChannelRequest>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(body) = body?;
    let request = SendRequest::channel(body.user_id.as_deref(), body.channel_id.as_deref())?;
    let channel = request.channel_id.as_deref().unwrap_or_default();

    deliver(
        &state,
        "channel_welcome",
        messages::channel_welcome(channel, &request.user_id),
    )
    .await
    .map_err(|err| ApiError::upstream("Slack channel message failed", err))?;

    Ok(Json(MessageBody {
        message: "Channel message sent!",
    }))
}

/// Posts the onboarding playlist. Takes no input, so any request body is ignored.
pub async fn send_video(State(state): State<Arc<AppState>>) -> Result<Json<MessageBody>, ApiError> {
    deliver(
        &state,
        "onboarding_videos",
        messages::onboarding_videos(&state.video_channel),
    )
    .await
    .map_err(|err| ApiError::upstream("Video post failed", err))?;

    Ok(Json(MessageBody {
        message: "Video message sent!",
    }))
}
