//! Analysis domain types

use serde::{Deserialize, Serialize};

/// Result of one analysis call for a stored log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Number of threats the analyzer reported for the record
    pub threats_found: u32,
    /// Set when the analyzer asks the caller to slow down
    pub is_rate_limited: bool,
    /// Suggested wait before retrying, in seconds
    pub retry_after_seconds: Option<u64>,
}

impl AnalysisOutcome {
    /// A completed analysis reporting `threats_found` threats
    pub fn threats(threats_found: u32) -> Self {
        Self {
            threats_found,
            ..Default::default()
        }
    }

    /// A throttled analysis with an optional retry hint
    pub fn rate_limited(retry_after_seconds: Option<u64>) -> Self {
        Self {
            threats_found: 0,
            is_rate_limited: true,
            retry_after_seconds,
        }
    }
}
