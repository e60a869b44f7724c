//! Estimate client methods

use serde_json::json;

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::estimate::{PublicEstimateCreated, Quote};
use crate::types::{
    EstimateQuery, EstimateRequest, EstimateStatus, Paginated, PublicEstimateRequest,
};

impl ApiClient {
    pub async fn list_estimates(
        &self,
        query: &EstimateQuery,
    ) -> Result<Paginated<EstimateRequest>, ClientError> {
        self.execute(ApiRequest::get("/estimates").query(query)?)
            .await
    }

    pub async fn get_estimate(&self, id: i64) -> Result<EstimateRequest, ClientError> {
        self.execute(ApiRequest::get(format!("/estimates/{id}"))).await
    }

    /// Send a priced quote to the customer
    pub async fn send_quote(
        &self,
        id: i64,
        amount: f64,
        message: &str,
    ) -> Result<EstimateRequest, ClientError> {
        let request = ApiRequest::post(format!("/estimates/{id}/quote")).json(&Quote {
            amount,
            message: message.to_string(),
        })?;
        self.execute(request).await
    }

    pub async fn update_estimate_status(
        &self,
        id: i64,
        status: EstimateStatus,
    ) -> Result<EstimateRequest, ClientError> {
        let request = ApiRequest::patch(format!("/estimates/{id}/status"))
            .json(&json!({ "status": status }))?;
        self.execute(request).await
    }

    /// Submit an estimate request through the public page (no session required)
    pub async fn create_public_estimate(
        &self,
        slug: &str,
        estimate: &PublicEstimateRequest,
    ) -> Result<PublicEstimateCreated, ClientError> {
        let request = ApiRequest::post(format!("/public/estimate/{slug}")).json(estimate)?;
        self.execute(request).await
    }
}
