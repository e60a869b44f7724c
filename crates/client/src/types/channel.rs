//! Messaging channels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported messaging platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Instagram,
    Kakao,
    Naver,
}

impl ChannelType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Kakao => "kakao",
            Self::Naver => "naver",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    Active,
    Inactive,
    Error,
}

/// A linked channel account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub channel_type: ChannelType,
    pub account_id: String,
    #[serde(default)]
    pub account_name: Option<String>,
    pub webhook_status: WebhookStatus,
    #[serde(default)]
    pub token_expires_at: Option<String>,
    pub is_active: bool,
}

/// Connection health of a single channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelStatus {
    pub connected: bool,
    pub webhook_status: String,
    #[serde(default)]
    pub token_expires_at: Option<String>,
}

/// OAuth entry point to open in a browser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectResponse {
    pub auth_url: String,
}
