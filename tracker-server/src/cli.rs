//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(name = "email-tracker")]
#[command(about = "Email open tracker: serve pixels, inspect and clean tracking data", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (config from env; flags override HOST / PORT).
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the most recently sent tracked messages with open stats.
    List {
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
    /// Remove the sender's own opens from one tracked message.
    PurgeSelfOpens {
        tracking_id: String,
    },
}

/// Load ServerConfig from environment.
pub fn load_config() -> Result<ServerConfig> {
    ServerConfig::load()
}
