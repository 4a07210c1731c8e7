//! Terminal output for interactive scans

use colored::*;
use logwarden_core::domain::scan::{ScanProgress, SubmissionResult};

/// Progress sink that prints colored lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgressSink;

impl crate::service::ProgressSink for ConsoleProgressSink {
    fn on_progress(&self, progress: &ScanProgress) {
        let line = progress_line(progress);
        if progress.threats_found > 0 {
            println!("  {} {}", "▸".cyan(), line.yellow());
        } else {
            println!("  {} {}", "▸".cyan(), line.dimmed());
        }
    }

    fn on_finish(&self, result: &SubmissionResult) {
        println!();
        if result.threats_found > 0 {
            println!("{}", format!("⚠ {}", result.summary()).yellow().bold());
        } else {
            println!("{}", format!("✓ {}", result.summary()).green().bold());
        }

        if result.skipped_entries > 0 || result.abandoned_entries > 0 {
            println!(
                "  {}",
                format!(
                    "{} not stored, {} not analyzed",
                    result.skipped_entries, result.abandoned_entries
                )
                .dimmed()
            );
        }
    }
}

/// `[n/N] pct% threats: T`
pub fn progress_line(progress: &ScanProgress) -> String {
    format!(
        "[{}/{}] {:>3.0}% threats: {}",
        progress.processed_count,
        progress.total_entries,
        progress.progress_fraction * 100.0,
        progress.threats_found
    )
}
