//! Auto-reply rules

use serde::{Deserialize, Serialize};

/// How rule keywords are matched against an incoming message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchType {
    Exact,
    Contains,
    Regex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoRule {
    pub id: i64,
    pub name: String,
    pub match_type: MatchType,
    pub keywords: String,
    pub response_template: String,
    #[serde(default)]
    pub include_reservation_link: bool,
    #[serde(default)]
    pub include_estimate_link: bool,
    pub priority: i32,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub cooldown_seconds: u32,
    #[serde(default)]
    pub active_hours_start: Option<String>,
    #[serde(default)]
    pub active_hours_end: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub trigger_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for creating a rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRule {
    pub name: String,
    pub match_type: MatchType,
    pub keywords: String,
    pub response_template: String,
    #[serde(default)]
    pub include_reservation_link: bool,
    #[serde(default)]
    pub include_estimate_link: bool,
    pub priority: i32,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub cooldown_seconds: u32,
    #[serde(default)]
    pub active_hours_start: Option<String>,
    #[serde(default)]
    pub active_hours_end: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// Partial rule update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_reservation_link: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_estimate_link: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_hours_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_hours_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// One entry of a reorder request
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RuleOrder {
    pub id: i64,
    pub priority: i32,
}

/// Outcome of a dry-run match against a sample message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTestResult {
    #[serde(default)]
    pub matched_rule: Option<AutoRule>,
    pub response_type: String,
    pub response_text: String,
    #[serde(default)]
    pub ai_tokens_used: Option<u64>,
    #[serde(default)]
    pub cached: Option<bool>,
    #[serde(default)]
    pub would_trigger_cooldown: Option<bool>,
}
