use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::egress::{MessageSender, OutboundMessage, SendError, SendResult};

pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// Slack Web API client for `chat.postMessage`.
pub struct SlackSender {
    http: reqwest::Client,
    bot_token: String,
    api_base: String,
}

impl SlackSender {
    pub fn new(http: reqwest::Client, bot_token: impl Into<String>, api_base: Option<String>) -> Self {
        Self {
            http,
            bot_token: bot_token.into(),
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.into()),
        }
    }

    /// Builds a sender whose HTTP client gives up after `timeout`.
    pub fn with_timeout(
        bot_token: impl Into<String>,
        api_base: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(http, bot_token, api_base))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl MessageSender for SlackSender {
    async fn post_message(&self, msg: OutboundMessage) -> Result<SendResult, SendError> {
        if msg.channel.trim().is_empty() {
            return Err(SendError::MissingChannel);
        }

        if self.api_base.starts_with("mock://") {
            return Ok(SendResult {
                message_id: Some("mock".into()),
                channel: Some(msg.channel.clone()),
                raw: Some(json!({
                    "channel": msg.channel,
                    "text": msg.text,
                    "blocks": msg.blocks,
                })),
            });
        }

        let url = self.build_url("chat.postMessage");
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.bot_token)
            .json(&msg)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            return Err(SendError::Status {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let raw: Value = serde_json::from_str(&body_text).unwrap_or(Value::Null);
        let ok = raw.get("ok").and_then(|v| v.as_bool()).unwrap_or(false);
        if !ok {
            let error = raw
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            return Err(SendError::Api {
                error: error.to_string(),
            });
        }

        let message_id = raw.get("ts").and_then(|v| v.as_str()).map(str::to_string);
        let channel = raw
            .get("channel")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        tracing::debug!(channel = ?channel, ts = ?message_id, "slack message posted");

        Ok(SendResult {
            message_id,
            channel,
            raw: Some(raw),
        })
    }
}
