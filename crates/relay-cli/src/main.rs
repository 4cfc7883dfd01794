use std::process::ExitCode;

use clap::Parser;
use relay_cli::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    Ok(ExitCode::from(run(cli).await))
}
