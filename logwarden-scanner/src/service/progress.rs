//! Progress reporting
//!
//! A batch run reports a snapshot after every entry and the final aggregate
//! once the batch is done.

use logwarden_core::domain::scan::{ScanProgress, SubmissionResult};
use tracing::info;

/// Receives progress updates from a batch run
pub trait ProgressSink: Send + Sync {
    /// Called after each entry finished its submit/analyze cycle
    fn on_progress(&self, progress: &ScanProgress);

    /// Called once after the last entry
    fn on_finish(&self, _result: &SubmissionResult) {}
}

/// Progress sink that writes to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn on_progress(&self, progress: &ScanProgress) {
        info!(
            "Processed {}/{} entries ({:.0}%), {} threat(s) so far",
            progress.processed_count,
            progress.total_entries,
            progress.progress_fraction * 100.0,
            progress.threats_found
        );
    }

    fn on_finish(&self, result: &SubmissionResult) {
        info!("Scan complete: {}", result.summary());
    }
}
