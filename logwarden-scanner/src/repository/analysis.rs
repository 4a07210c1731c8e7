//! Analyzer repository
//!
//! Requests threat analysis for stored records and classifies failures into
//! the cases the batch submitter treats differently: throttling and transport
//! hiccups are retried, everything else is final.

use async_trait::async_trait;
use logwarden_client::{BackendClient, ClientError};
use logwarden_core::domain::analysis::AnalysisOutcome;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Failure of one analysis call
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The analyzer asked the caller to slow down
    #[error("Analyzer rate limited the request")]
    RateLimited { retry_after: Option<u64> },

    /// The analyzer could not be reached
    #[error("Analyzer unreachable: {0}")]
    Transient(String),

    /// The analyzer answered with an error status
    #[error("Analyzer rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The analyzer answered with something that is not an analysis result
    #[error("Invalid analyzer response: {0}")]
    Invalid(String),
}

impl AnalyzeError {
    /// Whether the call may succeed if repeated after a pause
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Transient(_))
    }

    /// Retry hint carried by a rate-limit failure
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<ClientError> for AnalyzeError {
    fn from(err: ClientError) -> Self {
        if err.is_rate_limited() {
            return Self::RateLimited {
                retry_after: err.retry_after(),
            };
        }

        let status = err.status();
        match err {
            ClientError::ApiError { status, message } => Self::Rejected { status, message },
            ClientError::RequestFailed(e) if e.is_decode() => Self::Invalid(e.to_string()),
            ClientError::RequestFailed(e) => match status {
                Some(status) => Self::Rejected {
                    status,
                    message: e.to_string(),
                },
                None => Self::Transient(e.to_string()),
            },
            ClientError::RateLimited { retry_after } => Self::RateLimited { retry_after },
            ClientError::ParseError(msg) | ClientError::EmptyResponse(msg) => Self::Invalid(msg),
        }
    }
}

/// Repository trait for the threat analyzer
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyzes one stored record
    ///
    /// # Arguments
    /// * `log_id` - The stored record to analyze
    /// * `content` - The record's canonical content
    async fn analyze(&self, log_id: Uuid, content: &str) -> Result<AnalysisOutcome, AnalyzeError>;
}

/// HTTP implementation of Analyzer
///
/// The backend function loads the content from the stored record itself, so
/// only the record ID travels over the wire.
pub struct HttpAnalyzer {
    client: Arc<BackendClient>,
}

impl HttpAnalyzer {
    /// Creates a new HTTP analyzer
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    async fn analyze(&self, log_id: Uuid, content: &str) -> Result<AnalysisOutcome, AnalyzeError> {
        debug!("Requesting analysis of log {} ({} bytes)", log_id, content.len());

        let outcome = self.client.analyze_log(log_id).await?;
        Ok(outcome)
    }
}
