#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use http_body_util::BodyExt;
use relay_core::{MessageSender, OutboundMessage, SendError, SendResult};
use relay_server::{AppState, build_router};
use security::{SIGNATURE_HEADER, SlackVerifier, TIMESTAMP_HEADER};
use serde_json::Value;
use tokio::sync::{Mutex, Notify};

pub const SECRET: &str = "test-signing-secret";
pub const WELCOME_CHANNEL: &str = "CWELCOME";
pub const VIDEO_CHANNEL: &str = "CVIDEO";

/// Records every message and fails the channels it was told to fail.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<OutboundMessage>>,
    failing: Vec<String>,
    posted: Notify,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(channels: &[&str]) -> Self {
        Self {
            failing: channels.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Waits until at least `count` messages were posted, e.g. by a spawned join task.
    pub async fn wait_for(&self, count: usize) -> Vec<OutboundMessage> {
        let wait = async {
            loop {
                let notified = self.posted.notified();
                {
                    let sent = self.sent.lock().await;
                    if sent.len() >= count {
                        return sent.clone();
                    }
                }
                notified.await;
            }
        };
        tokio::time::timeout(Duration::from_secs(5), wait)
            .await
            .expect("sender was not called in time")
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn post_message(&self, msg: OutboundMessage) -> Result<SendResult, SendError> {
        let channel = msg.channel.clone();
        self.sent.lock().await.push(msg);
        self.posted.notify_waiters();
        if self.failing.contains(&channel) {
            return Err(SendError::Api {
                error: "channel_not_found".into(),
            });
        }
        Ok(SendResult {
            message_id: Some("1700000000.000100".into()),
            channel: Some(channel),
            raw: None,
        })
    }
}

pub fn state_with(sender: Arc<dyn MessageSender>) -> Arc<AppState> {
    Arc::new(AppState {
        sender,
        verifier: SlackVerifier::new(SECRET, security::DEFAULT_TOLERANCE_SECS),
        welcome_channel: WELCOME_CHANNEL.into(),
        video_channel: VIDEO_CHANNEL.into(),
    })
}

pub fn app(sender: Arc<RecordingSender>) -> Router {
    build_router(state_with(sender))
}

pub fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// A webhook request signed the way Slack signs it.
pub fn signed_event(body: &str, timestamp: i64) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/slack/events")
        .header("content-type", "application/json")
        .header(TIMESTAMP_HEADER, timestamp.to_string())
        .header(SIGNATURE_HEADER, security::sign(SECRET, timestamp, body.as_bytes()))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn read_text(response: Response<Body>) -> (StatusCode, String) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub fn team_join(user_id: &str) -> String {
    serde_json::json!({
        "type": "event_callback",
        "event_id": "Ev0001",
        "event": {
            "type": "team_join",
            "user": { "id": user_id, "name": "newbie" }
        }
    })
    .to_string()
}
