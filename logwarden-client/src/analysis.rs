//! Analysis function endpoint

use crate::BackendClient;
use crate::error::Result;
use logwarden_core::domain::analysis::AnalysisOutcome;
use logwarden_core::dto::analysis::{AnalyzeRequest, AnalyzeResponse};
use uuid::Uuid;

impl BackendClient {
    /// Run threat analysis on a stored log record
    ///
    /// The analysis function reads the record's content, classifies it and
    /// stores any threats it finds. A 429 answer surfaces as
    /// [`ClientError::RateLimited`](crate::ClientError::RateLimited); a
    /// success body may also carry `isRateLimited`, which is preserved in the
    /// returned outcome.
    ///
    /// # Arguments
    /// * `log_id` - The ID of the stored record to analyze
    pub async fn analyze_log(&self, log_id: Uuid) -> Result<AnalysisOutcome> {
        let url = format!("{}/functions/v1/analyze-log", self.base_url);
        let response = self
            .authorize(self.client.post(&url))
            .json(&AnalyzeRequest { log_id })
            .send()
            .await?;

        let body: AnalyzeResponse = self.handle_response(response).await?;
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_analyze_log_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/functions/v1/analyze-log")
            .match_header("authorization", "Bearer anon-key")
            .match_body(Matcher::Json(serde_json::json!({
                "logId": "00000000-0000-0000-0000-000000000000"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"threatsFound":3}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), "anon-key");
        let outcome = client.analyze_log(Uuid::nil()).await.unwrap();

        assert_eq!(outcome.threats_found, 3);
        assert!(!outcome.is_rate_limited);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_analyze_log_rate_limited() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/functions/v1/analyze-log")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Rate limited - too many requests.","retryAfter":5,"isRateLimited":true}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), "anon-key");
        let err = client.analyze_log(Uuid::nil()).await.unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after(), Some(5));
    }

    #[tokio::test]
    async fn test_analyze_log_payment_required() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/functions/v1/analyze-log")
            .with_status(402)
            .with_body(r#"{"error":"AI credits exhausted.","isPaymentRequired":true}"#)
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), "anon-key");
        let err = client.analyze_log(Uuid::nil()).await.unwrap_err();

        assert!(matches!(err, ClientError::ApiError { status: 402, .. }));
        assert!(!err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_analyze_log_invalid_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/functions/v1/analyze-log")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = BackendClient::new(server.url(), "anon-key");
        let err = client.analyze_log(Uuid::nil()).await.unwrap_err();

        assert!(matches!(err, ClientError::ParseError(_)));
    }
}
