//! Account and business profile

use serde::{Deserialize, Serialize};

/// Tone used by AI generated replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiTone {
    Professional,
    Friendly,
    Formal,
    Casual,
}

/// The signed-in account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub brand_name: String,
    pub industry: String,
    #[serde(default)]
    pub business_hours: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub reservation_slug: Option<String>,
    #[serde(default)]
    pub ai_enabled: bool,
    #[serde(default)]
    pub ai_tone: Option<AiTone>,
    #[serde(default)]
    pub banned_words: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Partial profile update; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_tone: Option<AiTone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banned_words: Option<Vec<String>>,
}

/// `PUT /profile/password` body
#[derive(Debug, Clone, Serialize)]
pub struct PasswordUpdate {
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
}
