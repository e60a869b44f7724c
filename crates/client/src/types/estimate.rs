//! Estimate (quote) requests

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateStatus {
    Pending,
    Quoted,
    Accepted,
    Rejected,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub service_type: String,
    pub details: String,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    pub status: EstimateStatus,
    #[serde(default)]
    pub quoted_amount: Option<f64>,
    pub created_at: String,
}

/// Filters for `GET /estimates`
#[derive(Debug, Clone, Default, Serialize)]
pub struct EstimateQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EstimateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// `POST /estimates/:id/quote` body
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub amount: f64,
    pub message: String,
}

/// Estimate submitted by a customer through the public page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicEstimateRequest {
    pub customer_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub service_type: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicEstimateCreated {
    pub message: String,
    pub estimate_id: i64,
}
