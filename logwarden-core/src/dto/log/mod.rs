//! Log record DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::record::LogStatus;

/// Row inserted into the `logs` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLogRecord {
    pub user_id: Uuid,
    pub filename: String,
    pub content: String,
    pub file_size: i64,
    pub status: LogStatus,
}

impl NewLogRecord {
    /// Builds a pending record; `file_size` is the UTF-8 byte length of `content`
    pub fn pending(user_id: Uuid, filename: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            user_id,
            filename: filename.into(),
            file_size: content.len() as i64,
            content,
            status: LogStatus::Pending,
        }
    }
}

/// Partial update applied to an existing `logs` row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogStatusUpdate {
    pub status: LogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl LogStatusUpdate {
    pub fn new(status: LogStatus) -> Self {
        let analyzed_at = match status {
            LogStatus::Analyzed => Some(chrono::Utc::now()),
            _ => None,
        };
        Self {
            status,
            analyzed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_record_counts_bytes() {
        let record = NewLogRecord::pending(Uuid::nil(), "a.txt", "Größe");
        assert_eq!(record.file_size, 7);
        assert_eq!(record.status, LogStatus::Pending);
    }

    #[test]
    fn test_status_update_skips_missing_timestamp() {
        let json = serde_json::to_value(LogStatusUpdate::new(LogStatus::Failed)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "failed" }));

        let json = serde_json::to_value(LogStatusUpdate::new(LogStatus::Analyzed)).unwrap();
        assert!(json.get("analyzed_at").is_some());
    }
}
