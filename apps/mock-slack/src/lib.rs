//! In-process fake of the Slack Web API.
//!
//! Serves `POST /api/chat.postMessage`, records every payload it receives and answers the way
//! Slack does. Point `SLACK_API_BASE` at `http://<addr>/api` to use it.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A `chat.postMessage` call as seen by the mock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostedMessage {
    pub token: String,
    pub payload: Value,
}

impl PostedMessage {
    pub fn channel(&self) -> Option<&str> {
        self.payload.get("channel").and_then(Value::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.payload.get("text").and_then(Value::as_str)
    }
}

#[derive(Default)]
struct Inner {
    posted: Vec<PostedMessage>,
    failing: HashSet<String>,
    seq: u64,
}

#[derive(Clone, Default)]
pub struct MockSlack {
    inner: Arc<Mutex<Inner>>,
}

impl MockSlack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every post to `channel` answer `ok: false, error: channel_not_found`.
    pub async fn fail_channel(&self, channel: impl Into<String>) {
        self.inner.lock().await.failing.insert(channel.into());
    }

    pub async fn posted(&self) -> Vec<PostedMessage> {
        self.inner.lock().await.posted.clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/chat.postMessage", post(post_message))
            .with_state(self.clone())
    }

    /// Serves the mock on an ephemeral localhost port and returns the API base URL.
    pub async fn spawn(&self) -> Result<String> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let app = self.router();
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "mock-slack server stopped");
            }
        });
        Ok(format!("http://{addr}/api"))
    }
}

async fn post_message(
    State(mock): State<MockSlack>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("")
        .to_string();
    if token.is_empty() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error": "not_authed"})),
        )
            .into_response();
    }

    tracing::info!("SLACK chat.postMessage: {}", payload);
    let channel = payload
        .get("channel")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut inner = mock.inner.lock().await;
    inner.posted.push(PostedMessage { token, payload });
    if channel.is_empty() || inner.failing.contains(&channel) {
        return Json(json!({"ok": false, "error": "channel_not_found"})).into_response();
    }
    inner.seq += 1;
    let ts = format!("1700000000.{:06}", inner.seq);
    Json(json!({"ok": true, "channel": channel, "ts": ts})).into_response()
}
