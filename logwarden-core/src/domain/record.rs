//! Stored log record types
//!
//! Mirrors the `logs` table of the hosted backend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A log record as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub content: String,
    pub file_size: i64,
    pub status: LogStatus,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub analyzed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Processing status of a stored log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Pending,
    Processing,
    Analyzed,
    Failed,
}

impl std::fmt::Display for LogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogStatus::Pending => "pending",
            LogStatus::Processing => "processing",
            LogStatus::Analyzed => "analyzed",
            LogStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&LogStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");

        let status: LogStatus = serde_json::from_str("\"analyzed\"").unwrap();
        assert_eq!(status, LogStatus::Analyzed);
    }

    #[test]
    fn test_record_without_timestamps() {
        let json = r#"{
            "id": "6f1c3b8e-2a4d-4c1e-9f00-1b2c3d4e5f60",
            "user_id": "0a0b0c0d-0e0f-4a1b-8c2d-3e4f5a6b7c8d",
            "filename": "upload.txt",
            "content": "Level\tDate and Time",
            "file_size": 19,
            "status": "pending"
        }"#;

        let record: LogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, LogStatus::Pending);
        assert_eq!(record.file_size, 19);
        assert!(record.created_at.is_none());
        assert!(record.analyzed_at.is_none());
    }
}
