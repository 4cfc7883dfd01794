use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use relay_core::{MessageSender, SlackSender};
use security::SlackVerifier;
use tower_http::cors::CorsLayer;

use crate::config::RelayConfig;
use crate::{manual, reqid::with_request_id, webhook};

pub const WEBHOOK_PATH: &str = "/api/slack/events";
pub const WELCOME_PATH: &str = "/api/send-welcome-message";
pub const CHANNEL_PATH: &str = "/api/send-channel-message";
pub const VIDEO_PATH: &str = "/api/send-video";

/// Read-only state shared by every handler.
pub struct AppState {
    pub sender: Arc<dyn MessageSender>,
    pub verifier: SlackVerifier,
    pub welcome_channel: String,
    pub video_channel: String,
}

impl AppState {
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let sender = SlackSender::with_timeout(
            config.bot_token.clone(),
            config.api_base.clone(),
            config.http_timeout,
        )
        .context("failed to build slack http client")?;
        tracing::info!(api_base = sender.api_base(), "slack sender ready");
        Ok(Self {
            sender: Arc::new(sender),
            verifier: SlackVerifier::new(
                config.signing_secret.clone(),
                config.signature_tolerance_secs,
            ),
            welcome_channel: config.welcome_channel.clone(),
            video_channel: config.video_channel.clone(),
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(webhook::handle_events))
        .route(WELCOME_PATH, post(manual::send_welcome_message))
        .route(CHANNEL_PATH, post(manual::send_channel_message))
        .route(VIDEO_PATH, post(manual::send_video))
        .route("/healthz", get(|| async { "ok" }))
        .layer(middleware::from_fn(with_request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
