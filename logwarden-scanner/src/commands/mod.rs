//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod parse;
mod scan;
mod watch;

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use logwarden_client::BackendClient;
use logwarden_scanner::config::Config;
use logwarden_scanner::repository::{HttpAnalyzer, HttpLogStore};
use logwarden_scanner::service::BatchSubmitter;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the canonical form of every entry in a log export
    Parse {
        /// Tab-separated event log export
        file: PathBuf,
    },
    /// Submit a log export for threat analysis
    Scan {
        /// Tab-separated event log export
        file: PathBuf,
    },
    /// Scan a simulated Windows event log once
    Simulate,
    /// Scan periodically until interrupted
    Watch {
        /// Minutes between scans (5 to 1440)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Log export to re-read on every scan instead of the simulated log
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Parse { file } => parse::handle_parse(&file).await,
        Commands::Scan { file } => scan::handle_scan(&file).await,
        Commands::Simulate => scan::handle_simulate().await,
        Commands::Watch { interval, file } => watch::handle_watch(interval, file).await,
    }
}

/// Loads and validates configuration from environment variables
fn load_config() -> Result<Config> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        "Loaded configuration: backend_url={}, user_id={}",
        config.backend_url, config.user_id
    );
    Ok(config)
}

/// Wires the HTTP repositories into a batch submitter
fn build_submitter(config: &Config) -> Result<BatchSubmitter> {
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let mut client = BackendClient::with_client(&config.backend_url, &config.api_key, http);
    if let Some(token) = &config.access_token {
        client = client.with_access_token(token);
    }
    let client = Arc::new(client);

    Ok(BatchSubmitter::new(
        Arc::new(HttpLogStore::new(Arc::clone(&client))),
        Arc::new(HttpAnalyzer::new(client)),
        config.user_id,
        config.retry_policy(),
    ))
}

/// Reads a log export from disk
async fn read_log_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Batch name derived from the file name, e.g. `security.txt` -> `security`
fn batch_name_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("upload")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_name_for() {
        assert_eq!(batch_name_for(Path::new("/var/log/security.txt")), "security");
        assert_eq!(batch_name_for(Path::new("export")), "export");
        assert_eq!(batch_name_for(Path::new("/")), "upload");
    }
}
