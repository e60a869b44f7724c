//! Shared fixtures for client integration tests

#![allow(dead_code)]

use std::sync::Arc;

use autoreply_client::{ApiClient, CredentialPair, MemorySessionStore, SessionStore};
use serde_json::{Value, json};
use wiremock::MockServer;

pub fn user_json() -> Value {
    json!({
        "id": 7,
        "email": "user@x.com",
        "brand_name": "Cafe Moka",
        "industry": "cafe",
        "business_hours": null,
        "address": null,
        "description": null,
        "contact_email": null,
        "contact_phone": null,
        "reservation_slug": "moka1234",
        "ai_enabled": true,
        "ai_tone": "friendly",
        "banned_words": [],
        "created_at": "2024-05-01T10:00:00"
    })
}

pub fn rule_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Opening hours",
        "match_type": "CONTAINS",
        "keywords": "hours,open",
        "response_template": "We are open 9-6.",
        "include_reservation_link": false,
        "include_estimate_link": false,
        "priority": 1,
        "channel": null,
        "cooldown_seconds": 0,
        "active_hours_start": null,
        "active_hours_end": null,
        "is_active": true,
        "trigger_count": 3,
        "created_at": "2024-05-01T10:00:00"
    })
}

pub fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// Client whose store is shared with the test so credentials can be inspected
pub fn client_with_store(
    server: &MockServer,
    store: Arc<MemorySessionStore>,
) -> ApiClient {
    ApiClient::builder()
        .base_url(api_base(server))
        .session_store(store as Arc<dyn SessionStore>)
        .build()
        .unwrap()
}

/// Client already holding `access`/`refresh`
pub fn signed_in_client(
    server: &MockServer,
    access: &str,
    refresh: &str,
) -> (ApiClient, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::with_credentials(&CredentialPair::new(
        access, refresh,
    )));
    (client_with_store(server, store.clone()), store)
}

/// Number of requests the server saw for `path`
pub async fn hits(server: &MockServer, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == path)
        .count()
}
