//! Log store repository
//!
//! Persists per-entry log records through the backend client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use logwarden_client::BackendClient;
use logwarden_core::domain::record::{LogRecord, LogStatus};
use logwarden_core::dto::log::NewLogRecord;
use std::sync::Arc;
use uuid::Uuid;

/// Repository trait for stored log records
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Stores a new log record
    ///
    /// # Arguments
    /// * `record` - The record to insert
    ///
    /// # Returns
    /// The stored record with its assigned ID
    async fn insert(&self, record: NewLogRecord) -> Result<LogRecord>;

    /// Updates the status of a stored record
    ///
    /// # Arguments
    /// * `log_id` - The record to update
    /// * `status` - The new status
    async fn update_status(&self, log_id: Uuid, status: LogStatus) -> Result<()>;
}

/// HTTP implementation of LogStore
pub struct HttpLogStore {
    client: Arc<BackendClient>,
}

impl HttpLogStore {
    /// Creates a new HTTP log store
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogStore for HttpLogStore {
    async fn insert(&self, record: NewLogRecord) -> Result<LogRecord> {
        self.client
            .insert_log(&record)
            .await
            .with_context(|| format!("Failed to store log record '{}'", record.filename))
    }

    async fn update_status(&self, log_id: Uuid, status: LogStatus) -> Result<()> {
        self.client
            .update_log_status(log_id, status)
            .await
            .with_context(|| format!("Failed to mark log {} as {}", log_id, status))
    }
}
