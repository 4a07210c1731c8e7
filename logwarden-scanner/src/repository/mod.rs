//! Repository layer
//!
//! Repositories are thin adapters over the backend client. They expose the
//! two collaborators the batch submitter depends on, without any business
//! logic of their own.
//!
//! All repositories are trait-based to enable testing and mocking.

mod analysis;
mod logs;

// Re-export traits
pub use analysis::{AnalyzeError, Analyzer};
pub use logs::LogStore;

// Re-export implementations
pub use analysis::HttpAnalyzer;
pub use logs::HttpLogStore;
