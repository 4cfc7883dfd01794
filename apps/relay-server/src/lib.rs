//! Slack onboarding relay.
//!
//! Receives signed Slack Events API webhooks, welcomes new members on `team_join`, and exposes
//! three manual trigger endpoints for the operator control panel.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod manual;
pub mod reqid;
pub mod webhook;

pub use config::RelayConfig;
pub use http::{AppState, WEBHOOK_PATH, build_router};
