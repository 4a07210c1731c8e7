//! Log record endpoints

use crate::BackendClient;
use crate::error::{ClientError, Result};
use logwarden_core::domain::record::{LogRecord, LogStatus};
use logwarden_core::dto::log::{LogStatusUpdate, NewLogRecord};
use uuid::Uuid;

impl BackendClient {
    // =============================================================================
    // Log Records
    // =============================================================================

    /// Insert a new log record
    ///
    /// # Arguments
    /// * `record` - The record to insert
    ///
    /// # Returns
    /// The stored record, including its backend-assigned ID
    pub async fn insert_log(&self, record: &NewLogRecord) -> Result<LogRecord> {
        let url = format!("{}/rest/v1/logs", self.base_url);
        let response = self
            .authorize(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        let mut rows: Vec<LogRecord> = self.handle_response(response).await?;
        if rows.is_empty() {
            return Err(ClientError::EmptyResponse(format!(
                "insert of '{}' returned no row",
                record.filename
            )));
        }

        Ok(rows.swap_remove(0))
    }

    /// Update the status of a log record
    ///
    /// # Arguments
    /// * `log_id` - The record ID
    /// * `status` - The new status
    pub async fn update_log_status(&self, log_id: Uuid, status: LogStatus) -> Result<()> {
        let url = format!("{}/rest/v1/logs", self.base_url);
        let response = self
            .authorize(self.client.patch(&url))
            .query(&[("id", format!("eq.{}", log_id))])
            .json(&LogStatusUpdate::new(status))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
