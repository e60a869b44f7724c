//! AI assistant client methods

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{ChannelType, RuleTestResult};

/// A suggested FAQ entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub keyword: String,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFaq {
    pub faqs: Vec<FaqEntry>,
    pub tokens_used: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub response: String,
    pub tokens_used: u64,
    #[serde(default)]
    pub cached: bool,
}

impl ApiClient {
    /// Run a message through rules and AI as if a customer sent it
    pub async fn ai_test_message(
        &self,
        message: &str,
        channel: ChannelType,
    ) -> Result<RuleTestResult, ClientError> {
        let request = ApiRequest::post("/ai/test-message")
            .json(&json!({ "message": message, "channel": channel }))?;
        self.execute(request).await
    }

    /// Suggest `count` FAQ entries from the business profile
    pub async fn generate_faq(&self, count: u32) -> Result<GeneratedFaq, ClientError> {
        let request = ApiRequest::post("/ai/generate-faq").json(&json!({ "count": count }))?;
        self.execute(request).await
    }

    pub async fn generate_response(&self, message: &str) -> Result<GeneratedResponse, ClientError> {
        let request =
            ApiRequest::post("/ai/generate-response").json(&json!({ "message": message }))?;
        self.execute(request).await
    }
}
