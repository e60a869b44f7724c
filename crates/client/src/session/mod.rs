//! Session state: the stored credential pair and the session lifecycle
//!
//! The credential pair lives behind a [`SessionStore`] that is injected into
//! [`ApiClient`](crate::ApiClient). Nothing else reads or writes credentials.

mod file;
mod memory;
mod state;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use state::SessionState;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Storage key of the access credential
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key of the refresh credential
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Access and refresh credentials issued together at login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Owner of the stored credentials
///
/// Implementations must be cheap to call; the client reads the access
/// credential before every request.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Current access credential, if any
    fn access_token(&self) -> Option<String>;

    /// Current refresh credential, if any
    fn refresh_token(&self) -> Option<String>;

    /// Replace both credentials
    fn store(&self, credentials: &CredentialPair) -> Result<(), ClientError>;

    /// Replace the access credential, keeping the refresh credential
    fn set_access_token(&self, access_token: &str) -> Result<(), ClientError>;

    /// Remove both credentials. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), ClientError>;
}

/// Both slots as persisted; either may be missing independently
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoredSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl StoredSlots {
    pub(crate) fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

impl From<&CredentialPair> for StoredSlots {
    fn from(pair: &CredentialPair) -> Self {
        Self {
            access_token: Some(pair.access_token.clone()),
            refresh_token: Some(pair.refresh_token.clone()),
        }
    }
}
