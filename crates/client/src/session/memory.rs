use std::sync::{PoisonError, RwLock};

use super::{CredentialPair, SessionStore, StoredSlots};
use crate::error::ClientError;

/// Process-local session store; credentials are lost when the process exits
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slots: RwLock<StoredSlots>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a credential pair
    pub fn with_credentials(credentials: &CredentialPair) -> Self {
        Self {
            slots: RwLock::new(StoredSlots::from(credentials)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<String> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token
            .clone()
    }

    fn store(&self, credentials: &CredentialPair) -> Result<(), ClientError> {
        *self.slots.write().unwrap_or_else(PoisonError::into_inner) =
            StoredSlots::from(credentials);
        Ok(())
    }

    fn set_access_token(&self, access_token: &str) -> Result<(), ClientError> {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token = Some(access_token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.slots.write().unwrap_or_else(PoisonError::into_inner) = StoredSlots::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_keeps_refresh_token() {
        let store = MemorySessionStore::with_credentials(&CredentialPair::new("A1", "R1"));
        store.set_access_token("A2").unwrap();
        assert_eq!(store.access_token().as_deref(), Some("A2"));
        assert_eq!(store.refresh_token().as_deref(), Some("R1"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemorySessionStore::new();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
    }
}
