//! Authentication context
//!
//! Tracks who is signed in on top of [`ApiClient`]. At start-up the context
//! is `Loading`; [`AuthContext::bootstrap`] verifies any stored credential
//! with `GET /auth/me` and settles on `Authenticated` or `Anonymous`.
//! Protected content should not be shown while the status is `Loading`.

use std::sync::{PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::session::SessionState;
use crate::types::{RegisterRequest, User};

/// Tri-state authentication status
#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    Loading,
    Authenticated(User),
    Anonymous,
}

impl AuthStatus {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Signed-in user plus the client that acts on their behalf
pub struct AuthContext {
    client: ApiClient,
    status: RwLock<AuthStatus>,
}

impl AuthContext {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            status: RwLock::new(AuthStatus::Loading),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Current status. A session that expired underneath the context reads
    /// as `Anonymous`.
    pub fn status(&self) -> AuthStatus {
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        if status.is_authenticated()
            && matches!(
                self.client.session_state(),
                SessionState::Anonymous | SessionState::Expired
            )
        {
            debug!("Session ended underneath auth context");
            *status = AuthStatus::Anonymous;
        }
        status.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.status().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.status().is_loading()
    }

    fn set_status(&self, next: AuthStatus) {
        *self.status.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Verify the stored credential and settle the status.
    ///
    /// Any failure, network or auth, clears the stored credentials.
    pub async fn bootstrap(&self) -> AuthStatus {
        self.try_bootstrap()
            .await
            .unwrap_or(AuthStatus::Anonymous)
    }

    /// Like [`bootstrap`](Self::bootstrap), but hands back the failure that
    /// ended the stored session. The status is already Anonymous when this
    /// returns an error.
    pub async fn try_bootstrap(&self) -> Result<AuthStatus, ClientError> {
        if self.client.session().access_token().is_none() {
            self.set_status(AuthStatus::Anonymous);
            return Ok(AuthStatus::Anonymous);
        }

        match self.client.me().await {
            Ok(user) => {
                info!(user_id = user.id, "Restored session");
                let next = AuthStatus::Authenticated(user);
                self.set_status(next.clone());
                Ok(next)
            }
            Err(err) => {
                warn!(error = %err, "Stored session could not be verified");
                if let Err(err) = self.client.clear_session() {
                    warn!(error = %err, "Failed to clear stored credentials");
                }
                self.set_status(AuthStatus::Anonymous);
                Err(err)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let response = self.client.login(email, password).await?;
        self.set_status(AuthStatus::Authenticated(response.user.clone()));
        Ok(response.user)
    }

    pub async fn register(&self, data: &RegisterRequest) -> Result<User, ClientError> {
        let response = self.client.register(data).await?;
        self.set_status(AuthStatus::Authenticated(response.user.clone()));
        Ok(response.user)
    }

    /// Log out; never fails because of the backend
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.client.logout().await?;
        self.set_status(AuthStatus::Anonymous);
        Ok(())
    }

    /// Replace the cached user after a profile edit
    pub fn update_user(&self, user: User) {
        self.set_status(AuthStatus::Authenticated(user));
    }

    /// Re-fetch the signed-in user; failures leave the cached user untouched
    pub async fn refresh_user(&self) {
        match self.client.me().await {
            Ok(user) => self.set_status(AuthStatus::Authenticated(user)),
            Err(err) => debug!(error = %err, "Ignoring user refresh failure"),
        }
    }

    /// Delete the account and end the session
    pub async fn delete_account(&self, password: &str) -> Result<(), ClientError> {
        self.client.delete_account(password).await?;
        self.set_status(AuthStatus::Anonymous);
        Ok(())
    }
}
