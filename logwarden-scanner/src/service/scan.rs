//! Scan preparation
//!
//! Validation that must happen before any record is stored or any analysis
//! is requested.

use chrono::{DateTime, SecondsFormat, Utc};
use logwarden_core::domain::entry::LogEntry;
use logwarden_core::parser::{check_input_size, parse_at};

use crate::error::ScanError;

/// Validates raw input and parses it into entries
///
/// # Errors
/// - `SizeLimitExceeded` if the input is over the size limit
/// - `NothingToProcess` if no entry could be parsed
pub fn prepare_entries(raw: &str, now: DateTime<Utc>) -> Result<Vec<LogEntry>, ScanError> {
    check_input_size(raw)?;

    let entries = parse_at(raw, now);
    if entries.is_empty() {
        return Err(ScanError::NothingToProcess);
    }

    Ok(entries)
}

/// Batch name used for scans of the simulated event log
pub fn auto_scan_batch_name(now: DateTime<Utc>) -> String {
    format!("auto-scan-{}", now.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use logwarden_core::parser::MAX_INPUT_CHARS;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_prepare_rejects_empty_input() {
        assert_eq!(prepare_entries("", now()), Err(ScanError::NothingToProcess));
        assert_eq!(
            prepare_entries("\n# comment only\n\n", now()),
            Err(ScanError::NothingToProcess)
        );
    }

    #[test]
    fn test_prepare_rejects_oversized_input() {
        let raw = "x".repeat(MAX_INPUT_CHARS + 1);
        assert!(matches!(
            prepare_entries(&raw, now()),
            Err(ScanError::SizeLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_prepare_parses_entries() {
        let raw = "Information\t2024-01-01\tSystem\t7036\tNone\n\
                   Warning\t2024-01-01\tDCOM\t10016\tNone";
        let entries = prepare_entries(raw, now()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_auto_scan_batch_name() {
        assert_eq!(auto_scan_batch_name(now()), "auto-scan-2024-01-01T00:00:00Z");
    }
}
