//! Billing plans and usage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Agency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    Cancelled,
    Expired,
    PastDue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub price_monthly: f64,
    #[serde(default)]
    pub daily_message_limit: Option<u32>,
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
    #[serde(default)]
    pub trial_ends_at: Option<String>,
    #[serde(default)]
    pub current_period_end: Option<String>,
}

/// Checkout page to complete an upgrade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkout {
    pub checkout_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSummary {
    pub today_messages: u64,
    #[serde(default)]
    pub daily_limit: Option<u64>,
    pub ai_tokens_used: u64,
    pub plan: String,
}

impl UsageSummary {
    /// Messages left today, `None` when the plan is unlimited
    pub fn remaining_today(&self) -> Option<u64> {
        self.daily_limit
            .map(|limit| limit.saturating_sub(self.today_messages))
    }
}
