use metrics::counter;

const SENT_COUNTER: &str = "relay_messages_sent_total";
const REJECTED_COUNTER: &str = "relay_webhook_rejected_total";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Ok,
    Failed,
}

impl SendOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendOutcome::Ok => "ok",
            SendOutcome::Failed => "failed",
        }
    }
}

/// Counts one outbound post. `kind` names the template, e.g. `onboarding_dm`.
pub fn record_send(kind: &'static str, outcome: SendOutcome) {
    counter!(SENT_COUNTER, "kind" => kind, "outcome" => outcome.as_str()).increment(1);
}

pub fn record_webhook_rejected(reason: &'static str) {
    counter!(REJECTED_COUNTER, "reason" => reason).increment(1);
}
