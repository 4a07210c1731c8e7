//! Core domain types
//!
//! This module contains the core structures shared by the client (for
//! persistence and analysis calls) and the scanner (for batch submission).

pub mod analysis;
pub mod entry;
pub mod record;
pub mod scan;
