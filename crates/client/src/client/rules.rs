//! Auto-reply rule client methods

use serde_json::json;

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{AutoRule, ChannelType, NewRule, RuleOrder, RuleTestResult, RuleUpdate};

impl ApiClient {
    /// List rules
    pub async fn list_rules(&self) -> Result<Vec<AutoRule>, ClientError> {
        self.execute(ApiRequest::get("/rules")).await
    }

    pub async fn get_rule(&self, id: i64) -> Result<AutoRule, ClientError> {
        self.execute(ApiRequest::get(format!("/rules/{id}"))).await
    }

    pub async fn create_rule(&self, rule: &NewRule) -> Result<AutoRule, ClientError> {
        self.execute(ApiRequest::post("/rules").json(rule)?).await
    }

    pub async fn update_rule(&self, id: i64, update: &RuleUpdate) -> Result<AutoRule, ClientError> {
        self.execute(ApiRequest::put(format!("/rules/{id}")).json(update)?)
            .await
    }

    pub async fn delete_rule(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("/rules/{id}")))
            .await
    }

    /// Flip a rule between active and inactive
    pub async fn toggle_rule(&self, id: i64) -> Result<AutoRule, ClientError> {
        self.execute(ApiRequest::patch(format!("/rules/{id}/toggle")))
            .await
    }

    /// Dry-run the rule engine against a sample message
    pub async fn test_rules(
        &self,
        message: &str,
        channel: ChannelType,
    ) -> Result<RuleTestResult, ClientError> {
        let request = ApiRequest::post("/rules/test")
            .json(&json!({ "message": message, "channel": channel }))?;
        self.execute(request).await
    }

    /// Persist a new priority order; returns the rules in their new order
    pub async fn reorder_rules(&self, order: &[RuleOrder]) -> Result<Vec<AutoRule>, ClientError> {
        let request = ApiRequest::post("/rules/reorder").json(&json!({ "rules": order }))?;
        self.execute(request).await
    }
}
