//! Scan command handlers
//!
//! One-shot scans of a log export or of the simulated event log.

use anyhow::Result;
use chrono::Utc;
use colored::*;
use std::path::Path;

use logwarden_core::sample::simulated_event_log;
use logwarden_scanner::console::ConsoleProgressSink;
use logwarden_scanner::error::ScanError;
use logwarden_scanner::service::{BatchSubmitter, auto_scan_batch_name};

use super::{batch_name_for, build_submitter, load_config, read_log_file};

/// Scan a log export
pub async fn handle_scan(file: &Path) -> Result<()> {
    let raw = read_log_file(file).await?;
    let config = load_config()?;
    let submitter = build_submitter(&config)?;

    run_interactive(&submitter, &batch_name_for(file), &raw).await
}

/// Scan the simulated event log once
pub async fn handle_simulate() -> Result<()> {
    let now = Utc::now();
    let config = load_config()?;
    let submitter = build_submitter(&config)?;

    run_interactive(&submitter, &auto_scan_batch_name(now), &simulated_event_log(now)).await
}

async fn run_interactive(submitter: &BatchSubmitter, batch_name: &str, raw: &str) -> Result<()> {
    println!("{}", format!("Scanning batch '{}'...", batch_name).bold());

    match submitter.scan_text(batch_name, raw, &ConsoleProgressSink).await {
        Ok(_) => Ok(()),
        Err(ScanError::NothingToProcess) => {
            println!("{}", "⚠ No log entries found, nothing to scan.".yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
