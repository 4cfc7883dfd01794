//! Client side of the relay's manual trigger endpoints.

pub mod cli;

use serde_json::{Value, json};
use thiserror::Error;

pub const DEFAULT_RELAY_URL: &str = "http://localhost:4000";

#[derive(Debug, Error)]
pub enum PanelError {
    /// Input the operator has to fill in before anything is sent.
    #[error("{0}")]
    MissingInput(&'static str),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct ControlPanel {
    http: reqwest::Client,
    base_url: String,
}

impl ControlPanel {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn send_welcome(&self, user_id: Option<&str>) -> Result<String, PanelError> {
        let user_id = filled(user_id).ok_or(PanelError::MissingInput(
            "Please enter a Slack user ID.",
        ))?;
        self.post("/api/send-welcome-message", Some(json!({ "userId": user_id })))
            .await
    }

    pub async fn send_channel(
        &self,
        user_id: Option<&str>,
        channel_id: Option<&str>,
    ) -> Result<String, PanelError> {
        let (Some(user_id), Some(channel_id)) = (filled(user_id), filled(channel_id)) else {
            return Err(PanelError::MissingInput(
                "Please enter both a Slack user ID and a Channel ID.",
            ));
        };
        self.post(
            "/api/send-channel-message",
            Some(json!({ "userId": user_id, "channelId": channel_id })),
        )
        .await
    }

    pub async fn send_video(&self) -> Result<String, PanelError> {
        self.post("/api/send-video", None).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<String, PanelError> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(|v| v.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .filter(|m| !m.is_empty())
                .or_else(|| (!text.is_empty()).then(|| text.clone()))
                .unwrap_or_else(|| status.to_string());
            return Err(PanelError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(text))
    }
}

fn filled(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
