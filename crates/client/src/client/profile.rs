//! Profile client methods

use serde_json::json;
use tracing::info;

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{PasswordUpdate, ProfileUpdate, User};

impl ApiClient {
    pub async fn get_profile(&self) -> Result<User, ClientError> {
        self.execute(ApiRequest::get("/profile")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ClientError> {
        self.execute(ApiRequest::put("/profile").json(update)?).await
    }

    pub async fn update_password(&self, update: &PasswordUpdate) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::put("/profile/password").json(update)?)
            .await
    }

    /// Permanently delete the account, then drop the local session
    pub async fn delete_account(&self, password: &str) -> Result<(), ClientError> {
        let request = ApiRequest::delete("/profile").json(&json!({ "password": password }))?;
        self.execute_empty(request).await?;
        self.clear_session()?;
        info!("Account deleted");
        Ok(())
    }
}
