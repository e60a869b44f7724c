//! Webhook test client method

use serde_json::{Value, json};

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;

impl ApiClient {
    /// Inject a fake Instagram message and return the backend's handling report
    pub async fn test_instagram_webhook(
        &self,
        message: &str,
        sender_id: Option<&str>,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::post("/webhook/instagram/test").json(&json!({
            "message": message,
            "sender_id": sender_id.unwrap_or("test_user"),
        }))?;
        self.execute(request).await
    }
}
