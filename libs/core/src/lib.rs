//! Core contracts for the welcome relay.
//!
//! This crate holds the short-lived value types passed between the webhook receiver and the
//! manual trigger endpoints, the onboarding message templates, and the outbound client used to
//! post them back to Slack.
pub mod egress;
pub mod messages;
pub mod platforms;
pub mod types;

pub use egress::*;
pub use platforms::slack::sender::SlackSender;
pub use types::*;
