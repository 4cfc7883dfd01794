//! Lightweight telemetry helpers for the welcome relay.
//! Installs the tracing subscriber and exposes the counters recorded by the server.

mod config;
mod metrics;
mod tracing_init;

pub use config::TelemetryConfig;
pub use metrics::{SendOutcome, record_send, record_webhook_rejected};
pub use tracing_init::{init_telemetry, is_installed};

/// Installs the shared subscriber configured from `RUST_LOG` and `LOG_FORMAT`.
pub fn install(cfg: TelemetryConfig) -> anyhow::Result<()> {
    init_telemetry(cfg)
}
