//! Scheduler layer for the scanner
//!
//! Re-triggers scans on a fixed interval until stopped.

pub mod periodic;

pub use periodic::{PeriodicScheduler, ScheduleState};
