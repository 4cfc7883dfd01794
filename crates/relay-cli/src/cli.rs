use clap::{Parser, Subcommand};

use crate::{ControlPanel, DEFAULT_RELAY_URL, PanelError};

#[derive(Parser, Debug)]
#[command(
    name = "welcome-relay-cli",
    version,
    about = "Control panel for the Slack welcome relay"
)]
pub struct Cli {
    /// Base URL of the running relay.
    #[arg(long, env = "RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    pub url: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Send the welcome DM to a user
    Welcome {
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Post a welcome for a user in a channel
    Channel {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        channel_id: Option<String>,
    },
    /// Post the onboarding video playlist
    Video,
}

/// Runs one command and maps the outcome to a process exit status.
///
/// Missing input exits with 2 without contacting the relay; any other failure exits with 1.
pub async fn run(cli: Cli) -> u8 {
    let panel = ControlPanel::new(cli.url);
    let result = match &cli.command {
        Command::Welcome { user_id } => panel.send_welcome(user_id.as_deref()).await,
        Command::Channel {
            user_id,
            channel_id,
        } => {
            panel
                .send_channel(user_id.as_deref(), channel_id.as_deref())
                .await
        }
        Command::Video => panel.send_video().await,
    };

    match result {
        Ok(message) => {
            println!("{message}");
            0
        }
        Err(PanelError::MissingInput(hint)) => {
            eprintln!("warning: {hint}");
            2
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}
