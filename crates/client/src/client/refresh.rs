//! 401 recovery: one silent credential refresh, coalesced across requests

use tracing::{info, warn};

use super::ApiClient;
use crate::error::ClientError;
use crate::session::SessionState;

impl ApiClient {
    /// Make a fresh access credential available after a 401.
    ///
    /// `sent_token` is the access credential the rejected request carried.
    /// Refreshes are serialized by the refresh gate: a caller that waited
    /// behind another refresh and finds the stored credential already
    /// changed reuses it instead of refreshing again. On `Ok` the caller
    /// replays its request once.
    pub(crate) async fn recover_unauthorized(
        &self,
        sent_token: Option<&str>,
    ) -> Result<(), ClientError> {
        let _gate = self.refresh_gate.lock().await;

        let current = self.store.access_token();
        if current.is_some() && current.as_deref() != sent_token {
            info!("Reusing access credential refreshed by a concurrent request");
            return Ok(());
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            if sent_token.is_none() && current.is_none() {
                // Nothing was signed in, so there is no session to expire
                warn!("Unauthorized without stored credentials");
                return Err(ClientError::SessionExpired);
            }
            return Err(self.expire_session("no refresh credential stored"));
        };

        self.set_state(SessionState::Refreshing);
        match self.refresh(&refresh_token).await {
            Ok(refreshed) => {
                if let Err(err) = self.store.set_access_token(&refreshed.access_token) {
                    warn!(error = %err, "Failed to persist refreshed access credential");
                    return Err(self.expire_session("refreshed credential not persisted"));
                }
                self.set_state(SessionState::Authenticated);
                info!("Access credential refreshed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Credential refresh rejected");
                Err(self.expire_session("refresh rejected"))
            }
        }
    }

    /// Clear both credentials and move the session to `Expired`
    pub(crate) fn expire_session(&self, reason: &str) -> ClientError {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "Failed to clear stored credentials");
        }
        self.set_state(SessionState::Expired);
        warn!(reason, "Session expired");
        ClientError::SessionExpired
    }
}
