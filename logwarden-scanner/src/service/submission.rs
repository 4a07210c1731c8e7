//! Batch submission service
//!
//! Drives one pass over a parsed batch: every entry is stored as its own
//! record and then analyzed, strictly one after another. Rate-limit signals
//! are retried with a growing wait; every other per-entry failure is logged
//! and the batch moves on.

use chrono::Utc;
use logwarden_core::domain::entry::LogEntry;
use logwarden_core::domain::record::LogStatus;
use logwarden_core::domain::scan::SubmissionResult;
use logwarden_core::dto::log::NewLogRecord;
use logwarden_core::format::format_entry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ScanError;
use crate::repository::{Analyzer, LogStore};
use crate::service::progress::ProgressSink;
use crate::service::scan::prepare_entries;

/// Longest server-provided retry hint that is honored
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(15 * 60);

/// Retry and pacing settings for a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Analysis attempts per entry before it is abandoned
    pub max_retries: u32,
    /// Lower bound of the wait after a rate-limit signal
    pub min_retry_wait: Duration,
    /// Extra wait per retry already made
    pub retry_step: Duration,
    /// Pause between two entries
    pub entry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            min_retry_wait: Duration::from_secs(5),
            retry_step: Duration::from_secs(2),
            entry_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Wait before the next attempt, after `retries` rate-limited attempts
    ///
    /// `max(retry_after, min_retry_wait) + retries * retry_step`, with the
    /// hint capped at [`MAX_RETRY_AFTER`]
    pub fn backoff(&self, retries: u32, retry_after: Option<u64>) -> Duration {
        let hinted = Duration::from_secs(retry_after.unwrap_or(0)).min(MAX_RETRY_AFTER);
        hinted
            .max(self.min_retry_wait)
            .saturating_add(self.retry_step.saturating_mul(retries))
    }
}

/// How one entry's cycle ended
enum EntryOutcome {
    Analyzed(u32),
    Abandoned,
    Skipped,
}

/// Sequential submitter for parsed log batches
///
/// Clones share one run guard: while a run is in progress, any other `run`
/// on this submitter or its clones is rejected with `AlreadyRunning`.
#[derive(Clone)]
pub struct BatchSubmitter {
    store: Arc<dyn LogStore>,
    analyzer: Arc<dyn Analyzer>,
    user_id: Uuid,
    policy: RetryPolicy,
    run_guard: Arc<Mutex<()>>,
}

impl BatchSubmitter {
    /// Creates a new batch submitter
    ///
    /// # Arguments
    /// * `store` - Where per-entry records are persisted
    /// * `analyzer` - Who classifies the stored records
    /// * `user_id` - Owner of the created records
    /// * `policy` - Retry and pacing settings
    pub fn new(
        store: Arc<dyn LogStore>,
        analyzer: Arc<dyn Analyzer>,
        user_id: Uuid,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            store,
            analyzer,
            user_id,
            policy,
            run_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Whether a run currently holds the guard
    pub fn is_running(&self) -> bool {
        self.run_guard.try_lock().is_err()
    }

    /// Validates and parses raw text, then runs the resulting batch
    ///
    /// Rejected input never reaches the store or the analyzer.
    pub async fn scan_text(
        &self,
        batch_name: &str,
        raw: &str,
        sink: &dyn ProgressSink,
    ) -> Result<SubmissionResult, ScanError> {
        let entries = prepare_entries(raw, Utc::now())?;
        info!("Parsed {} entries for batch '{}'", entries.len(), batch_name);

        self.run(batch_name, &entries, sink).await
    }

    /// Submits every entry of a batch for storage and analysis
    ///
    /// # Arguments
    /// * `batch_name` - Prefix for the per-entry record filenames
    /// * `entries` - The parsed batch, processed in order
    /// * `sink` - Receives a snapshot after every entry
    ///
    /// # Errors
    /// - `NothingToProcess` if `entries` is empty
    /// - `AlreadyRunning` if another run holds the guard
    pub async fn run(
        &self,
        batch_name: &str,
        entries: &[LogEntry],
        sink: &dyn ProgressSink,
    ) -> Result<SubmissionResult, ScanError> {
        if entries.is_empty() {
            return Err(ScanError::NothingToProcess);
        }

        let _guard = self
            .run_guard
            .try_lock()
            .map_err(|_| ScanError::AlreadyRunning)?;

        info!(
            "Starting batch '{}' with {} entries",
            batch_name,
            entries.len()
        );

        let mut result = SubmissionResult::new(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            let number = idx + 1;

            match self.process_entry(batch_name, number, entry).await {
                EntryOutcome::Analyzed(threats) => result.threats_found += u64::from(threats),
                EntryOutcome::Abandoned => result.abandoned_entries += 1,
                EntryOutcome::Skipped => result.skipped_entries += 1,
            }

            result.processed_count += 1;
            sink.on_progress(&result.progress());

            if number < entries.len() {
                tokio::time::sleep(self.policy.entry_delay).await;
            }
        }

        info!(
            "Batch '{}' finished: {} ({} skipped, {} abandoned)",
            batch_name,
            result.summary(),
            result.skipped_entries,
            result.abandoned_entries
        );
        sink.on_finish(&result);

        Ok(result)
    }

    /// Stores and analyzes a single entry
    async fn process_entry(&self, batch_name: &str, number: usize, entry: &LogEntry) -> EntryOutcome {
        let content = format_entry(entry);
        let filename = format!("{}-entry-{}.txt", batch_name, number);

        let record = match self
            .store
            .insert(NewLogRecord::pending(self.user_id, filename, content.as_str()))
            .await
        {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping entry {}: {:#}", number, e);
                return EntryOutcome::Skipped;
            }
        };

        debug!("Stored entry {} as log {}", number, record.id);

        match self.analyze_with_retry(record.id, &content).await {
            Some(threats) => {
                debug!("Log {} analyzed: {} threat(s)", record.id, threats);
                EntryOutcome::Analyzed(threats)
            }
            None => {
                if let Err(e) = self.store.update_status(record.id, LogStatus::Failed).await {
                    warn!("{:#}", e);
                }
                EntryOutcome::Abandoned
            }
        }
    }

    /// Requests analysis, retrying on rate limits
    ///
    /// Returns the threat count, or `None` when the entry is abandoned.
    async fn analyze_with_retry(&self, log_id: Uuid, content: &str) -> Option<u32> {
        let mut retries = 0;

        loop {
            let retry_after = match self.analyzer.analyze(log_id, content).await {
                Ok(outcome) if !outcome.is_rate_limited => return Some(outcome.threats_found),
                Ok(outcome) => outcome.retry_after_seconds,
                Err(e) if e.is_retryable() => {
                    debug!("Analysis of log {} not completed: {}", log_id, e);
                    e.retry_after()
                }
                Err(e) => {
                    warn!("Analysis of log {} failed: {}", log_id, e);
                    return None;
                }
            };

            retries += 1;
            if retries >= self.policy.max_retries {
                warn!(
                    "Giving up on log {} after {} rate-limited attempts",
                    log_id, retries
                );
                return None;
            }

            let wait = self.policy.backoff(retries, retry_after);
            warn!(
                "Rate limited on log {}, retrying in {:?} (attempt {}/{})",
                log_id, wait, retries, self.policy.max_retries
            );
            tokio::time::sleep(wait).await;
        }
    }
}
