//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Blanket ceiling applied to every call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`ApiClient`](crate::ApiClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL, including any path prefix such as `/api`
    pub base_url: String,

    /// Request timeout in seconds, 0 for no timeout
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("autoreply-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
