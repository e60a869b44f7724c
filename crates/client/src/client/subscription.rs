//! Subscription client methods

use serde_json::json;

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::subscription::Checkout;
use crate::types::{Plan, Subscription, UsageSummary};

impl ApiClient {
    pub async fn get_subscription(&self) -> Result<Subscription, ClientError> {
        self.execute(ApiRequest::get("/subscription")).await
    }

    /// Start an upgrade; the returned checkout URL completes payment
    pub async fn upgrade_subscription(&self, plan: Plan) -> Result<Checkout, ClientError> {
        if plan == Plan::Free {
            return Err(ClientError::Configuration(
                "cannot upgrade to the free plan".into(),
            ));
        }
        let request = ApiRequest::post("/subscription/upgrade").json(&json!({ "plan": plan }))?;
        self.execute(request).await
    }

    pub async fn cancel_subscription(&self) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::post("/subscription/cancel"))
            .await
    }

    pub async fn resume_subscription(&self) -> Result<Subscription, ClientError> {
        self.execute(ApiRequest::post("/subscription/resume")).await
    }

    pub async fn subscription_usage(&self) -> Result<UsageSummary, ClientError> {
        self.execute(ApiRequest::get("/subscription/usage")).await
    }
}
