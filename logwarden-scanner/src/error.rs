//! Scan error types
//!
//! Only conditions that stop a scan before its first entry are errors here.
//! Failures of individual entries are absorbed by the batch submitter.

use logwarden_core::parser::InputTooLarge;
use thiserror::Error;

/// Reasons a scan does not start
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// The input produced no log entries
    #[error("No log entries found in input")]
    NothingToProcess,

    /// The input exceeds the accepted size
    #[error("Input too large: {len} characters (maximum {max})")]
    SizeLimitExceeded { len: usize, max: usize },

    /// Another scan holds the run guard
    #[error("A scan is already in progress")]
    AlreadyRunning,
}

impl From<InputTooLarge> for ScanError {
    fn from(err: InputTooLarge) -> Self {
        Self::SizeLimitExceeded {
            len: err.len,
            max: err.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ScanError::SizeLimitExceeded {
            len: 100_001,
            max: 100_000,
        };
        assert_eq!(
            error.to_string(),
            "Input too large: 100001 characters (maximum 100000)"
        );
        assert_eq!(
            ScanError::NothingToProcess.to_string(),
            "No log entries found in input"
        );
    }
}
