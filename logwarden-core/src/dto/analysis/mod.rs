//! Analysis function DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::analysis::AnalysisOutcome;

/// Body sent to the analysis function
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub log_id: Uuid,
}

/// Body returned by the analysis function
///
/// Both the success body (`{"success": true, "threatsFound": 2}`) and the
/// throttling body (`{"error": "...", "retryAfter": 5, "isRateLimited": true}`)
/// decode into this shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub threats_found: u32,
    #[serde(default)]
    pub is_rate_limited: bool,
    #[serde(default, alias = "retryAfterSeconds")]
    pub retry_after: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<AnalyzeResponse> for AnalysisOutcome {
    fn from(response: AnalyzeResponse) -> Self {
        Self {
            threats_found: response.threats_found,
            is_rate_limited: response.is_rate_limited,
            retry_after_seconds: response.retry_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let json = serde_json::to_value(AnalyzeRequest { log_id: Uuid::nil() }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "logId": "00000000-0000-0000-0000-000000000000" })
        );
    }

    #[test]
    fn test_success_body() {
        let response: AnalyzeResponse =
            serde_json::from_str(r#"{"success":true,"threatsFound":2}"#).unwrap();
        let outcome = AnalysisOutcome::from(response);
        assert_eq!(outcome, AnalysisOutcome::threats(2));
    }

    #[test]
    fn test_throttled_body() {
        let response: AnalyzeResponse = serde_json::from_str(
            r#"{"error":"Rate limited - too many requests.","retryAfter":5,"isRateLimited":true}"#,
        )
        .unwrap();
        let outcome = AnalysisOutcome::from(response);
        assert!(outcome.is_rate_limited);
        assert_eq!(outcome.retry_after_seconds, Some(5));
    }

    #[test]
    fn test_retry_after_seconds_alias() {
        let response: AnalyzeResponse =
            serde_json::from_str(r#"{"isRateLimited":true,"retryAfterSeconds":12}"#).unwrap();
        assert_eq!(response.retry_after, Some(12));
    }
}
