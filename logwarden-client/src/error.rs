//! Error types for the Logwarden client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Logwarden client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Backend asked the caller to slow down (HTTP 429)
    #[error("Rate limited by backend (retry after {retry_after:?}s)")]
    RateLimited {
        /// Suggested wait in seconds, when the backend provided one
        retry_after: Option<u64>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Backend accepted the request but returned no row
    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a rate-limit signal
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. }) || matches!(self, Self::ApiError { status: 429, .. })
    }

    /// Retry hint carried by a rate-limit error
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// HTTP status code, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_helpers() {
        let err = ClientError::RateLimited {
            retry_after: Some(7),
        };
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after(), Some(7));
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn test_api_error_classification() {
        let err = ClientError::api_error(402, "AI credits exhausted");
        assert!(!err.is_rate_limited());
        assert_eq!(err.status(), Some(402));
        assert_eq!(err.to_string(), "API error (status 402): AI credits exhausted");

        let err = ClientError::api_error(429, "slow down");
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_parse_error_has_no_status() {
        let err = ClientError::ParseError("bad json".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_rate_limited());
    }
}
