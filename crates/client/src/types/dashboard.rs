//! Dashboard statistics

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayStats {
    pub total_messages: u64,
    pub rule_responses: u64,
    pub ai_responses: u64,
    pub avg_response_time_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub total_messages: u64,
    pub rule_responses: u64,
    pub ai_responses: u64,
    pub ai_tokens_used: u64,
    pub ai_cost_estimate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelBreakdown {
    pub channel: String,
    pub message_count: u64,
    pub response_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRule {
    pub rule_id: i64,
    pub rule_name: String,
    pub trigger_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub message_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today: TodayStats,
    pub monthly: MonthlyStats,
    #[serde(default)]
    pub by_channel: Vec<ChannelBreakdown>,
    #[serde(default)]
    pub top_rules: Vec<TopRule>,
    #[serde(default)]
    pub daily_trend: Vec<DailyCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub date: String,
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelStat {
    pub channel: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseStat {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub connected_channels: u32,
    pub active_rules: u32,
    pub pending_reservations: u32,
}
