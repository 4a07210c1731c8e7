//! Watch command handler
//!
//! Runs automatic scans until Ctrl-C.

use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use std::path::PathBuf;
use tracing::{error, info, warn};

use logwarden_core::sample::simulated_event_log;
use logwarden_scanner::error::ScanError;
use logwarden_scanner::scheduler::PeriodicScheduler;
use logwarden_scanner::service::{BatchSubmitter, TracingProgressSink, auto_scan_batch_name};

use super::{batch_name_for, build_submitter, load_config, read_log_file};

pub async fn handle_watch(interval: Option<u64>, file: Option<PathBuf>) -> Result<()> {
    let mut config = load_config()?;
    if let Some(minutes) = interval {
        config = config.with_scan_interval_minutes(minutes);
        config.validate().context("Invalid scan interval")?;
    }

    let submitter = build_submitter(&config)?;

    let source = match &file {
        Some(path) => path.display().to_string(),
        None => "simulated event log".to_string(),
    };
    println!(
        "{}",
        format!(
            "Scanning {} every {} minute(s). Press Ctrl-C to stop.",
            source,
            config.scan_interval.as_secs() / 60
        )
        .bold()
    );

    let mut scheduler = PeriodicScheduler::new();
    scheduler.start(config.scan_interval, move || {
        let submitter = submitter.clone();
        let file = file.clone();
        async move { scheduled_scan(&submitter, file).await }
    })?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    println!("{}", "Stopping, waiting for the current scan to finish...".dimmed());
    scheduler.shutdown().await;

    Ok(())
}

/// One automatic scan; failures are logged and the schedule continues
async fn scheduled_scan(submitter: &BatchSubmitter, file: Option<PathBuf>) {
    let now = Utc::now();

    let (batch_name, raw) = match file {
        Some(path) => match read_log_file(&path).await {
            Ok(raw) => (batch_name_for(&path), raw),
            Err(e) => {
                error!("Automatic scan skipped: {:#}", e);
                return;
            }
        },
        None => (auto_scan_batch_name(now), simulated_event_log(now)),
    };

    match submitter
        .scan_text(&batch_name, &raw, &TracingProgressSink)
        .await
    {
        Ok(result) => info!("Automatic scan '{}' done: {}", batch_name, result.summary()),
        Err(ScanError::NothingToProcess) => info!("Automatic scan found nothing to process"),
        Err(e) => warn!("Automatic scan not run: {}", e),
    }
}
