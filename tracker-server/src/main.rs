//! email-tracker binary: serve the tracking API or run a maintenance command.

use anyhow::Result;
use clap::Parser;
use tracker_server::commands::{handle_list, handle_purge_self_opens};
use tracker_server::{load_config, run_server, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config()?;

    match cli.command {
        Commands::Serve { host, port } => run_server(config.with_overrides(host, port)).await,
        Commands::List { limit } => handle_list(config, limit).await,
        Commands::PurgeSelfOpens { tracking_id } => {
            handle_purge_self_opens(config, &tracking_id).await
        }
    }
}
