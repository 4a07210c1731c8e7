//! Canonical entry formatting
//!
//! The canonical form is a two-line, tab-separated block: the fixed column
//! header followed by one data line. It is both the content stored for each
//! entry and the text the analysis function feeds into its prompt, so the
//! column order and the optional sixth column must not change.

use crate::domain::entry::LogEntry;

/// Column header of the canonical form
pub const CANONICAL_HEADER: &str = "Level\tDate and Time\tSource\tEvent ID\tTask Category";

/// Formats one entry as canonical two-line content
///
/// The description column is only appended when the entry has a non-empty
/// description.
///
/// # Example
/// ```
/// use logwarden_core::domain::entry::LogEntry;
/// use logwarden_core::format::format_entry;
///
/// let entry = LogEntry {
///     level: "Warning".to_string(),
///     timestamp: "2024-01-01 10:00:00".to_string(),
///     source: "DCOM".to_string(),
///     event_id: "10016".to_string(),
///     category: "None".to_string(),
///     description: None,
/// };
/// assert_eq!(
///     format_entry(&entry),
///     "Level\tDate and Time\tSource\tEvent ID\tTask Category\n\
///      Warning\t2024-01-01 10:00:00\tDCOM\t10016\tNone"
/// );
/// ```
pub fn format_entry(entry: &LogEntry) -> String {
    let mut out = format!(
        "{}\n{}\t{}\t{}\t{}\t{}",
        CANONICAL_HEADER,
        entry.level,
        entry.timestamp,
        entry.source,
        entry.event_id,
        entry.category
    );

    let description = entry.description_text();
    if !description.is_empty() {
        out.push('\t');
        out.push_str(description);
    }

    out
}
