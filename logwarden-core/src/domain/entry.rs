//! Log entry domain types

use serde::{Deserialize, Serialize};

/// One normalized event extracted from raw log text
///
/// `level`, `source`, `event_id` and `category` are never empty; the parser
/// fills in defaults when the source line omits them. `timestamp` is passed
/// through exactly as the source wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub timestamp: String,
    pub source: String,
    pub event_id: String,
    pub category: String,
    pub description: Option<String>,
}

impl LogEntry {
    /// Description text, or an empty string when the line carried none
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}
