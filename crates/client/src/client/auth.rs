//! Authentication API client methods

use tracing::{info, warn};

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::session::{CredentialPair, SessionState};
use crate::types::{
    AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, User,
};

impl ApiClient {
    /// Log in with email and password and store the issued credentials
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request = ApiRequest::post("/auth/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response: AuthResponse = self.decode_unintercepted(&request).await?;
        self.begin_session(&response)?;
        info!(user_id = response.user.id, "Logged in");
        Ok(response)
    }

    /// Create an account and store the issued credentials
    pub async fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let request = ApiRequest::post("/auth/register").json(data)?;
        let response: AuthResponse = self.decode_unintercepted(&request).await?;
        self.begin_session(&response)?;
        info!(user_id = response.user.id, "Registered account");
        Ok(response)
    }

    /// Exchange a refresh credential for a new access credential.
    ///
    /// This call bypasses the 401 interceptor and does not touch the store.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ClientError> {
        let request = ApiRequest::post("/auth/refresh").json(&RefreshRequest { refresh_token })?;
        self.decode_unintercepted(&request).await
    }

    /// End the session.
    ///
    /// The backend is told on a best-effort basis; its answer is ignored and
    /// the local credentials are cleared regardless. Logging out with no
    /// stored session sends nothing.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if self.store.access_token().is_some() {
            let request = ApiRequest::post("/auth/logout");
            if let Err(err) = self.send_unintercepted(&request, true).await {
                warn!(error = %err, "Ignoring logout failure");
            }
        }
        self.clear_session()?;
        info!("Logged out");
        Ok(())
    }

    /// Get the signed-in user
    pub async fn me(&self) -> Result<User, ClientError> {
        self.execute(ApiRequest::get("/auth/me")).await
    }

    /// Browser URL that starts Google sign-in
    pub fn google_login_url(&self) -> String {
        self.url("/auth/google")
    }

    /// Browser URL that starts Instagram sign-in
    pub fn instagram_login_url(&self) -> String {
        self.url("/auth/instagram")
    }

    fn begin_session(&self, response: &AuthResponse) -> Result<(), ClientError> {
        self.store.store(&CredentialPair::new(
            response.access_token.clone(),
            response.refresh_token.clone(),
        ))?;
        self.set_state(SessionState::Authenticated);
        Ok(())
    }

    async fn decode_unintercepted<T: serde::de::DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.send_unintercepted(request, false).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
