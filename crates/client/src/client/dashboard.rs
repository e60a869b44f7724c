//! Dashboard client methods

use serde_json::json;

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{
    ChannelStat, ChartDataPoint, DashboardStats, DashboardSummary, MessageLog, ResponseStat,
};

impl ApiClient {
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        self.execute(ApiRequest::get("/dashboard/stats")).await
    }

    /// Most recent `limit` messages
    pub async fn recent_activity(&self, limit: u32) -> Result<Vec<MessageLog>, ClientError> {
        let request =
            ApiRequest::get("/dashboard/recent-activity").query(&json!({ "limit": limit }))?;
        self.execute(request).await
    }

    /// Daily message counts for the last `days` days
    pub async fn dashboard_chart(&self, days: u32) -> Result<Vec<ChartDataPoint>, ClientError> {
        let request = ApiRequest::get("/dashboard/chart").query(&json!({ "days": days }))?;
        self.execute(request).await
    }

    pub async fn channel_stats(&self) -> Result<Vec<ChannelStat>, ClientError> {
        self.execute(ApiRequest::get("/dashboard/channel-stats"))
            .await
    }

    pub async fn response_stats(&self) -> Result<Vec<ResponseStat>, ClientError> {
        self.execute(ApiRequest::get("/dashboard/response-stats"))
            .await
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ClientError> {
        self.execute(ApiRequest::get("/dashboard/summary")).await
    }
}
