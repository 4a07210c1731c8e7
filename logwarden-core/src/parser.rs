//! Event log parser
//!
//! Turns raw uploaded or generated log text into an ordered list of
//! normalized [`LogEntry`] values. Parsing never fails: lines that cannot be
//! understood are either wrapped as free-text entries or skipped.
//!
//! Each data line is split on tabs and handled by one of three strategies,
//! chosen by field count:
//! - Strict (5+ fields): `Level, Date and Time, Source, Event ID, Task Category[, Description...]`
//! - Loose (3-4 fields): `Date and Time, Source, Event ID[, Description]`
//! - Free text: any other line longer than 10 characters that is not a `#` comment

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::entry::LogEntry;

/// Largest raw input accepted for a scan, in characters
pub const MAX_INPUT_CHARS: usize = 100_000;

/// Number of leading lines searched for a column header
const HEADER_SEARCH_LINES: usize = 5;

/// Free-text lines must be longer than this to become an entry
const MIN_FREE_TEXT_CHARS: usize = 10;

const DEFAULT_LEVEL: &str = "Information";
const DEFAULT_SOURCE: &str = "Unknown";
const DEFAULT_EVENT_ID: &str = "0";
const DEFAULT_CATEGORY: &str = "None";

/// Rejection of an input that exceeds [`MAX_INPUT_CHARS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputTooLarge {
    pub len: usize,
    pub max: usize,
}

/// Checks the raw input against [`MAX_INPUT_CHARS`]
pub fn check_input_size(raw: &str) -> Result<(), InputTooLarge> {
    // Byte length is an upper bound on the char count, skip the scan when it fits.
    if raw.len() <= MAX_INPUT_CHARS {
        return Ok(());
    }

    let len = raw.chars().count();
    if len > MAX_INPUT_CHARS {
        return Err(InputTooLarge {
            len,
            max: MAX_INPUT_CHARS,
        });
    }
    Ok(())
}

/// Parses raw log text using the current time for defaulted timestamps
///
/// # Example
/// ```
/// use logwarden_core::parser::parse;
///
/// let raw = "Level\tDate and Time\tSource\tEvent ID\tTask Category\n\
///            Information\t2024-01-01\tSystem\t7036\tNone";
/// let entries = parse(raw);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].source, "System");
/// ```
pub fn parse(raw: &str) -> Vec<LogEntry> {
    parse_at(raw, Utc::now())
}

/// Parses raw log text, stamping defaulted timestamps with `now`
///
/// All entries of one call share the same default timestamp, so the result
/// is fully determined by `raw` and `now`.
pub fn parse_at(raw: &str, now: DateTime<Utc>) -> Vec<LogEntry> {
    let content = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let lines: Vec<&str> = content.split('\n').collect();
    let now = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let start = find_header(&lines).map_or(0, |idx| idx + 1);

    lines[start..]
        .iter()
        .filter_map(|line| parse_line(line, &now))
        .collect()
}

/// Index of the column header line, if one appears near the top
fn find_header(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .take(HEADER_SEARCH_LINES)
        .position(|line| {
            let lower = line.to_lowercase();
            lower.contains("level") && (lower.contains("date") || lower.contains("time"))
        })
}

fn parse_line(line: &str, now: &str) -> Option<LogEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

    match fields.len() {
        n if n >= 5 => Some(parse_strict(&fields, now)),
        3 | 4 => Some(parse_loose(&fields, now)),
        _ if line.chars().count() > MIN_FREE_TEXT_CHARS && !line.starts_with('#') => {
            Some(free_text(line, now))
        }
        _ => None,
    }
}

/// `Level, Date and Time, Source, Event ID, Task Category[, Description...]`
fn parse_strict(fields: &[&str], now: &str) -> LogEntry {
    LogEntry {
        level: or_default(fields[0], DEFAULT_LEVEL),
        timestamp: or_default(fields[1], now),
        source: or_default(fields[2], DEFAULT_SOURCE),
        event_id: or_default(fields[3], DEFAULT_EVENT_ID),
        category: or_default(fields[4], DEFAULT_CATEGORY),
        description: join_description(&fields[5..]),
    }
}

/// `Date and Time, Source, Event ID[, Description]`
fn parse_loose(fields: &[&str], now: &str) -> LogEntry {
    LogEntry {
        level: DEFAULT_LEVEL.to_string(),
        timestamp: or_default(fields[0], now),
        source: or_default(fields[1], DEFAULT_SOURCE),
        event_id: or_default(fields[2], DEFAULT_EVENT_ID),
        category: DEFAULT_CATEGORY.to_string(),
        description: join_description(&fields[3..]),
    }
}

fn free_text(line: &str, now: &str) -> LogEntry {
    LogEntry {
        level: DEFAULT_LEVEL.to_string(),
        timestamp: now.to_string(),
        source: DEFAULT_SOURCE.to_string(),
        event_id: DEFAULT_EVENT_ID.to_string(),
        category: DEFAULT_CATEGORY.to_string(),
        description: Some(line.to_string()),
    }
}

fn or_default(field: &str, default: &str) -> String {
    if field.is_empty() {
        default.to_string()
    } else {
        field.to_string()
    }
}

fn join_description(rest: &[&str]) -> Option<String> {
    let joined = rest.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
