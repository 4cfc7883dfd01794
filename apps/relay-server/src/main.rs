use std::sync::Arc;

use anyhow::Result;
use axum::serve;
use relay_server::{AppState, RelayConfig, build_router};
use relay_telemetry::{TelemetryConfig, install};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    install(TelemetryConfig::from_env("welcome-relay", env!("CARGO_PKG_VERSION")))?;

    let config = RelayConfig::from_env()?;
    info!(?config, "configuration loaded");
    let state = Arc::new(AppState::from_config(&config)?);
    let router = build_router(state);

    let listener = TcpListener::bind(config.addr).await?;
    info!("welcome-relay listening on {}", config.addr);

    serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
