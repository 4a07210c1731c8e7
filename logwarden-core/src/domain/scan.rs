//! Scan aggregate types
//!
//! A `SubmissionResult` is owned by exactly one batch run. It is created
//! fresh when the run starts and only updated after an entry's full
//! submit/analyze cycle has finished, so observers never see a half-done entry.

use serde::{Deserialize, Serialize};

/// Running totals for one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Entries parsed from the raw input
    pub total_entries: usize,
    /// Entries that finished their cycle, with or without a result
    pub processed_count: usize,
    /// Sum of the threat counts reported by the analyzer
    pub threats_found: u64,
    /// Entries whose record could not be stored
    pub skipped_entries: usize,
    /// Entries whose analysis was given up
    pub abandoned_entries: usize,
}

impl SubmissionResult {
    /// Creates an empty aggregate for a batch of `total_entries`
    pub fn new(total_entries: usize) -> Self {
        Self {
            total_entries,
            ..Default::default()
        }
    }

    /// Fraction of the batch that has been processed, in `0.0..=1.0`
    pub fn progress_fraction(&self) -> f64 {
        if self.total_entries == 0 {
            return 0.0;
        }
        self.processed_count as f64 / self.total_entries as f64
    }

    /// Whether every entry has been processed
    pub fn is_complete(&self) -> bool {
        self.processed_count >= self.total_entries
    }

    /// Snapshot handed to progress sinks
    pub fn progress(&self) -> ScanProgress {
        ScanProgress {
            processed_count: self.processed_count,
            total_entries: self.total_entries,
            progress_fraction: self.progress_fraction(),
            threats_found: self.threats_found,
        }
    }

    /// Human-readable summary of the run
    pub fn summary(&self) -> String {
        if self.threats_found > 0 {
            format!(
                "{} threat(s) found across {} entries",
                self.threats_found, self.processed_count
            )
        } else {
            format!("{} entries scanned, none found", self.processed_count)
        }
    }
}

/// Progress update emitted after every entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanProgress {
    pub processed_count: usize,
    pub total_entries: usize,
    pub progress_fraction: f64,
    pub threats_found: u64,
}
