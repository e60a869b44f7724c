//! Message log client methods

use chrono::NaiveDate;

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{LogExportQuery, LogQuery, MessageLog, Paginated};

/// A downloaded export, ready to be written to disk
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Suggested file name, `message-logs-YYYY-MM-DD.csv`
    pub filename: String,
    pub contents: Vec<u8>,
}

impl ExportFile {
    pub fn filename_for(date: NaiveDate) -> String {
        format!("message-logs-{}.csv", date.format("%Y-%m-%d"))
    }
}

impl ApiClient {
    pub async fn list_logs(&self, query: &LogQuery) -> Result<Paginated<MessageLog>, ClientError> {
        self.execute(ApiRequest::get("/logs").query(query)?).await
    }

    pub async fn get_log(&self, id: i64) -> Result<MessageLog, ClientError> {
        self.execute(ApiRequest::get(format!("/logs/{id}"))).await
    }

    /// Download the logs matching `query` as CSV
    pub async fn export_logs(&self, query: &LogExportQuery) -> Result<ExportFile, ClientError> {
        let contents = self
            .execute_bytes(ApiRequest::get("/logs/export").query(query)?)
            .await?;
        Ok(ExportFile {
            filename: ExportFile::filename_for(chrono::Utc::now().date_naive()),
            contents,
        })
    }
}
