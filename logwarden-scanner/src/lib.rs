//! Logwarden Scanner
//!
//! Submits parsed log entries to the hosted backend for threat analysis.
//!
//! Architecture:
//! - Configuration: Load settings from environment
//! - Repositories: Log store and analyzer seams over the backend client
//! - Services: Scan preparation, batch submission with retry/backoff, progress sinks
//! - Scheduler: Periodic re-triggering of scans
//!
//! A scan parses raw event-log text into entries, stores each entry's
//! canonical content as its own record, asks the analyzer to classify it,
//! and aggregates the threat counts. Entries are processed one at a time
//! with a pause between them to stay under the analyzer's rate limits.

pub mod config;
pub mod console;
pub mod error;
pub mod repository;
pub mod scheduler;
pub mod service;
