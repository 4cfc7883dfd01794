use relay_core::{OutboundMessage, SendError, SendResult};
use relay_telemetry::{SendOutcome, record_send};

use crate::http::AppState;

/// Posts one message through the configured sender, logging and counting the outcome.
///
/// `kind` names the template and is used as the metric label.
pub async fn deliver(
    state: &AppState,
    kind: &'static str,
    msg: OutboundMessage,
) -> Result<SendResult, SendError> {
    let channel = msg.channel.clone();
    match state.sender.post_message(msg).await {
        Ok(result) => {
            record_send(kind, SendOutcome::Ok);
            tracing::info!(
                kind,
                channel = %channel,
                ts = result.message_id.as_deref().unwrap_or(""),
                "slack message sent"
            );
            Ok(result)
        }
        Err(err) => {
            record_send(kind, SendOutcome::Failed);
            tracing::error!(
                kind,
                channel = %channel,
                code = err.code(),
                error = %err,
                "slack send failed"
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use relay_core::{MessageSender, SlackSender};
    use security::SlackVerifier;
    use tracing_test::traced_test;

    use super::*;

    struct Unreachable;

    #[async_trait]
    impl MessageSender for Unreachable {
        async fn post_message(&self, _msg: OutboundMessage) -> Result<SendResult, SendError> {
            Err(SendError::Api {
                error: "not_in_channel".into(),
            })
        }
    }

    fn state(sender: Arc<dyn MessageSender>) -> AppState {
        AppState {
            sender,
            verifier: SlackVerifier::new("s", 300),
            welcome_channel: "CWELCOME".into(),
            video_channel: "CVIDEO".into(),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn logs_successful_send() {
        let sender = SlackSender::with_timeout(
            "xoxb",
            Some("mock://slack".into()),
            Duration::from_secs(1),
        )
        .unwrap();
        let state = state(Arc::new(sender));
        let res = deliver(&state, "onboarding_dm", OutboundMessage::text("U1", "hi"))
            .await
            .unwrap();
        assert_eq!(res.channel.as_deref(), Some("U1"));
        assert!(logs_contain("slack message sent"));
    }

    #[tokio::test]
    #[traced_test]
    async fn logs_and_returns_failure() {
        let state = state(Arc::new(Unreachable));
        let err = deliver(&state, "onboarding_videos", OutboundMessage::text("C1", "x"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "slack_send_failed");
        assert!(logs_contain("slack send failed"));
    }
}
