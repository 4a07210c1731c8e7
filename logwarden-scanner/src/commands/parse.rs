//! Parse command handler
//!
//! Shows what a scan would submit without touching the network.

use anyhow::Result;
use chrono::Utc;
use colored::*;
use std::path::Path;

use logwarden_core::format::{CANONICAL_HEADER, format_entry};
use logwarden_scanner::error::ScanError;
use logwarden_scanner::service::prepare_entries;

use super::read_log_file;

pub async fn handle_parse(file: &Path) -> Result<()> {
    let raw = read_log_file(file).await?;

    let entries = match prepare_entries(&raw, Utc::now()) {
        Ok(entries) => entries,
        Err(ScanError::NothingToProcess) => {
            println!("{}", "No log entries found.".yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "{}",
        format!("Parsed {} entries from {}:", entries.len(), file.display()).bold()
    );
    println!("{}", CANONICAL_HEADER.dimmed());
    for entry in &entries {
        println!("{}", format_entry(entry));
    }

    Ok(())
}
