use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slack event type emitted when a new member joins the workspace.
pub const TEAM_JOIN_EVENT: &str = "team_join";

/// A single Slack event pulled out of an `event_callback` envelope.
///
/// Built once per webhook call and dropped as soon as the handler returns.
///
/// ```
/// use relay_core::InboundEvent;
///
/// let event = InboundEvent::new("team_join", "U123");
/// assert!(event.is_join());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub event_type: String,
    pub user_id: String,
}

impl InboundEvent {
    pub fn new(event_type: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            user_id: user_id.into(),
        }
    }

    pub fn is_join(&self) -> bool {
        self.event_type == TEAM_JOIN_EVENT
    }

    /// Converts the event into the send request used for the welcome DM.
    pub fn to_send_request(&self) -> Result<SendRequest, ValidationError> {
        SendRequest::welcome(Some(self.user_id.as_str()))
    }
}

/// Who a message is about and, for channel posts, where it goes.
///
/// `user_id` is always non-empty. `channel_id` is only set by [`SendRequest::channel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl SendRequest {
    /// Validates the input for a welcome DM.
    ///
    /// ```
    /// use relay_core::SendRequest;
    ///
    /// assert!(SendRequest::welcome(Some(" ")).is_err());
    /// assert_eq!(SendRequest::welcome(Some("U1")).unwrap().user_id, "U1");
    /// ```
    pub fn welcome(user_id: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: required("userId", user_id)?,
            channel_id: None,
        })
    }

    /// Validates the input for a channel welcome message.
    pub fn channel(user_id: Option<&str>, channel_id: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: required("userId", user_id)?,
            channel_id: Some(required("channelId", channel_id)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

fn required(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}
