//! Service layer
//!
//! Services contain the business logic of the scanner. They validate and
//! parse raw input, drive the per-entry submit/analyze cycle through the
//! repositories, and report progress.

mod progress;
mod scan;
mod submission;

// Re-export traits
pub use progress::ProgressSink;

// Re-export implementations
pub use progress::TracingProgressSink;
pub use scan::{auto_scan_batch_name, prepare_entries};
pub use submission::{BatchSubmitter, RetryPolicy};
