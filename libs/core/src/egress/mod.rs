use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Text object used inside layout blocks. Only `mrkdwn` is ever sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    Mrkdwn { text: String },
}

/// The subset of Slack layout blocks the relay emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: TextObject },
}

impl Block {
    pub fn mrkdwn_section(text: impl Into<String>) -> Self {
        Block::Section {
            text: TextObject::Mrkdwn { text: text.into() },
        }
    }
}

/// One `chat.postMessage` call worth of content.
///
/// `text` is always present; with blocks it doubles as the notification fallback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub channel: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
}

impl OutboundMessage {
    pub fn text(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct SendResult {
    /// Slack message `ts`.
    pub message_id: Option<String>,
    pub channel: Option<String>,
    pub raw: Option<Value>,
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("channel missing")]
    MissingChannel,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("status={status} body={body}")]
    Status { status: u16, body: String },
    #[error("{error}")]
    Api { error: String },
}

impl SendError {
    /// Stable identifier for log fields and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            SendError::MissingChannel => "slack_missing_channel",
            SendError::Transport(_) => "slack_transport",
            SendError::Status { .. } => "slack_status",
            SendError::Api { .. } => "slack_send_failed",
        }
    }
}

/// Posts a single message to the chat platform. No batching, no retry.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn post_message(&self, msg: OutboundMessage) -> Result<SendResult, SendError>;
}
