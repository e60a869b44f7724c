//! Authentication request and response bodies

use serde::{Deserialize, Serialize};

use super::user::User;

/// `POST /auth/login` body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    /// The backend expects this one field in camelCase
    #[serde(rename = "brandName")]
    pub brand_name: String,
    pub industry: String,
}

/// Response of login and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: User,
}

/// `POST /auth/refresh` body
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response of the refresh endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<User>,
}
