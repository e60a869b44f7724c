//! Message logs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::channel::ChannelType;

/// How a message was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Rule,
    Ai,
    Manual,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageLog {
    pub id: i64,
    pub channel: ChannelType,
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub received_message: String,
    #[serde(default)]
    pub response_message: Option<String>,
    pub response_type: ResponseType,
    #[serde(default)]
    pub matched_rule_id: Option<i64>,
    #[serde(default)]
    pub ai_tokens_used: u64,
    #[serde(default)]
    pub processing_time_ms: Option<u64>,
    pub created_at: String,
}

/// Filters for `GET /logs`
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Filters for `GET /logs/export`
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogExportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}
