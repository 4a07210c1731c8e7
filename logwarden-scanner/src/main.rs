//! Logwarden
//!
//! Command-line scanner that turns Windows event log exports into
//! per-entry records and submits them to the backend for threat analysis.
//!
//! Configuration comes from `LOGWARDEN_*` environment variables; see
//! `logwarden_scanner::config::Config::from_env`.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "logwarden")]
#[command(about = "Security log normalization and threat scan submission", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logwarden_scanner=info,logwarden_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    handle_command(cli.command).await
}
