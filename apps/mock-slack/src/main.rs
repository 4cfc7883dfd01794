use anyhow::Result;
use mock_slack::MockSlack;
use relay_telemetry::{TelemetryConfig, install};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    install(TelemetryConfig::from_env("mock-slack", env!("CARGO_PKG_VERSION")))?;
    let bind = std::env::var("MOCK_SLACK_BIND").unwrap_or_else(|_| "0.0.0.0:9082".into());
    let mock = MockSlack::new();
    let listener = TcpListener::bind(&bind).await?;
    tracing::info!("mock-slack listening on {}", listener.local_addr()?);
    axum::serve(listener, mock.router()).await?;
    Ok(())
}
