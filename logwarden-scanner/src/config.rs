//! Scanner configuration
//!
//! Defines all configurable parameters for the scanner including the
//! backend connection, retry/backoff tuning, and the automatic scan interval.

use std::time::Duration;
use uuid::Uuid;

use crate::service::RetryPolicy;

/// Shortest allowed automatic scan interval (5 minutes)
pub const MIN_SCAN_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Longest allowed automatic scan interval (24 hours)
pub const MAX_SCAN_INTERVAL: Duration = Duration::from_secs(1440 * 60);

/// Scanner configuration
///
/// Retry counts and delays are configurable so the scanner can be tuned to
/// the rate limits of the analyzer it talks to.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (e.g., "https://project.example.co")
    pub backend_url: String,

    /// Project API key sent with every request
    pub api_key: String,

    /// Access token of the signed-in user, if any
    pub access_token: Option<String>,

    /// Owner of the records created by this scanner
    pub user_id: Uuid,

    /// Analysis attempts per entry before giving up
    pub max_retries: u32,

    /// Pause between two entries of a batch
    pub entry_delay: Duration,

    /// Lower bound of the wait after a rate-limit signal
    pub min_retry_wait: Duration,

    /// Extra wait added per retry already made
    pub retry_step: Duration,

    /// How often automatic scans run
    pub scan_interval: Duration,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(backend_url: String, api_key: String, user_id: Uuid) -> Self {
        let policy = RetryPolicy::default();
        Self {
            backend_url,
            api_key,
            access_token: None,
            user_id,
            max_retries: policy.max_retries,
            entry_delay: policy.entry_delay,
            min_retry_wait: policy.min_retry_wait,
            retry_step: policy.retry_step,
            scan_interval: Duration::from_secs(60 * 60),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - LOGWARDEN_BACKEND_URL (required)
    /// - LOGWARDEN_API_KEY (required)
    /// - LOGWARDEN_USER_ID (required, UUID)
    /// - LOGWARDEN_ACCESS_TOKEN (optional)
    /// - LOGWARDEN_MAX_RETRIES (optional, default: 5)
    /// - LOGWARDEN_ENTRY_DELAY (optional, seconds, default: 5)
    /// - LOGWARDEN_MIN_RETRY_WAIT (optional, seconds, default: 5)
    /// - LOGWARDEN_RETRY_STEP (optional, seconds, default: 2)
    /// - LOGWARDEN_SCAN_INTERVAL (optional, minutes, default: 60)
    /// - LOGWARDEN_REQUEST_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("LOGWARDEN_BACKEND_URL")
            .ok_or_else(|| anyhow::anyhow!("LOGWARDEN_BACKEND_URL environment variable not set"))?;

        let api_key = lookup("LOGWARDEN_API_KEY")
            .ok_or_else(|| anyhow::anyhow!("LOGWARDEN_API_KEY environment variable not set"))?;

        let user_id = lookup("LOGWARDEN_USER_ID")
            .ok_or_else(|| anyhow::anyhow!("LOGWARDEN_USER_ID environment variable not set"))?;
        let user_id = Uuid::parse_str(&user_id)
            .map_err(|e| anyhow::anyhow!("LOGWARDEN_USER_ID is not a valid UUID: {}", e))?;

        let mut config = Self::new(backend_url, api_key, user_id);

        config.access_token = lookup("LOGWARDEN_ACCESS_TOKEN").filter(|s| !s.is_empty());

        let seconds = |key: &str| {
            lookup(key)
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
        };

        if let Some(max_retries) = lookup("LOGWARDEN_MAX_RETRIES").and_then(|s| s.parse().ok()) {
            config.max_retries = max_retries;
        }
        if let Some(delay) = seconds("LOGWARDEN_ENTRY_DELAY") {
            config.entry_delay = delay;
        }
        if let Some(wait) = seconds("LOGWARDEN_MIN_RETRY_WAIT") {
            config.min_retry_wait = wait;
        }
        if let Some(step) = seconds("LOGWARDEN_RETRY_STEP") {
            config.retry_step = step;
        }
        if let Some(timeout) = seconds("LOGWARDEN_REQUEST_TIMEOUT") {
            config.request_timeout = timeout;
        }

        config.scan_interval = lookup("LOGWARDEN_SCAN_INTERVAL")
            .and_then(|s| s.parse::<u64>().ok())
            .map(minutes_to_duration)
            .unwrap_or(config.scan_interval);

        Ok(config)
    }

    /// Overrides the automatic scan interval, in minutes
    pub fn with_scan_interval_minutes(mut self, minutes: u64) -> Self {
        self.scan_interval = minutes_to_duration(minutes);
        self
    }

    /// Retry/backoff settings for the batch submitter
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            entry_delay: self.entry_delay,
            min_retry_wait: self.min_retry_wait,
            retry_step: self.retry_step,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backend_url.is_empty() {
            anyhow::bail!("backend_url cannot be empty");
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            anyhow::bail!("backend_url must start with http:// or https://");
        }

        if self.api_key.is_empty() {
            anyhow::bail!("api_key cannot be empty");
        }

        if self.max_retries == 0 {
            anyhow::bail!("max_retries must be greater than 0");
        }

        if self.scan_interval < MIN_SCAN_INTERVAL || self.scan_interval > MAX_SCAN_INTERVAL {
            anyhow::bail!(
                "scan_interval must be between {} and {} minutes",
                MIN_SCAN_INTERVAL.as_secs() / 60,
                MAX_SCAN_INTERVAL.as_secs() / 60
            );
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

/// Saturates on overflow so `validate` rejects absurd values
fn minutes_to_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}
