//! Logwarden HTTP Client
//!
//! A small, type-safe HTTP client for the hosted backend that stores log
//! records and runs threat analysis on them.
//!
//! The backend exposes two surfaces:
//! - REST tables under `/rest/v1` (log records)
//! - Edge functions under `/functions/v1` (the `analyze-log` function)
//!
//! Every request carries the project API key and a bearer token, so row-level
//! authorization on the backend sees the signed-in user.
//!
//! # Example
//!
//! ```no_run
//! use logwarden_client::BackendClient;
//! use logwarden_core::dto::log::NewLogRecord;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> logwarden_client::Result<()> {
//!     let client = BackendClient::new("https://project.example.co", "anon-key")
//!         .with_access_token("user-jwt");
//!
//!     let record = client
//!         .insert_log(&NewLogRecord::pending(Uuid::new_v4(), "upload.txt", "..."))
//!         .await?;
//!     let outcome = client.analyze_log(record.id).await?;
//!
//!     println!("{} threat(s)", outcome.threats_found);
//!     Ok(())
//! }
//! ```

mod analysis;
pub mod error;
mod logs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use logwarden_core::dto::analysis::AnalyzeResponse;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP client for the hosted backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// Base URL of the backend project (e.g., "https://project.example.co")
    base_url: String,
    /// Project API key, sent as the `apikey` header
    api_key: String,
    /// Bearer token of the signed-in user
    access_token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend project
    /// * `api_key` - The project API key
    ///
    /// # Example
    /// ```
    /// use logwarden_client::BackendClient;
    ///
    /// let client = BackendClient::new("http://localhost:54321", "anon-key");
    /// ```
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: None,
            client,
        }
    }

    /// Use a user access token instead of the API key as bearer
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Adds the API key and bearer token headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.access_token.as_deref().unwrap_or(&self.api_key);
        request.header("apikey", &self.api_key).bearer_auth(token)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., PATCH operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await?;
        Ok(())
    }

    /// Turns non-success statuses into errors, mapping 429 to `RateLimited`
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = serde_json::from_str::<AnalyzeResponse>(&error_text)
                .ok()
                .and_then(|body| body.retry_after);
            tracing::debug!("Backend rate limited request (retry after {:?})", retry_after);
            return Err(ClientError::RateLimited { retry_after });
        }

        Err(ClientError::api_error(status.as_u16(), error_text))
    }
}
