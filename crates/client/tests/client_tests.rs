//! Integration tests for the AutoReply API client

mod common;

use std::sync::Arc;
use std::time::Duration;

use autoreply_client::types::onboarding::ToneSetting;
use autoreply_client::types::{
    ChannelType, LogExportQuery, LogQuery, OnboardingStep, Plan, RegisterRequest, RuleUpdate,
};
use autoreply_client::{
    ApiClient, ApiErrorBody, ClientConfig, ClientError, ExportFile, MemorySessionStore,
    SessionState, SessionStore,
};
use common::{api_base, client_with_store, hits, rule_json, signed_in_client, user_json};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_builder() {
    let client = ApiClient::builder()
        .base_url("http://localhost:8080/api")
        .timeout(Duration::from_secs(5))
        .user_agent("autoreply-tests")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080/api");
    assert_eq!(
        client.google_login_url(),
        "http://localhost:8080/api/auth/google"
    );
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = ApiClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_login_stores_credentials_then_authenticates_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "user@x.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A1",
            "refresh_token": "R1",
            "token_type": "Bearer",
            "user": user_json()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client_with_store(&mock_server, store.clone());
    assert_eq!(client.session_state(), SessionState::Anonymous);

    let response = client.login("user@x.com", "pw").await.unwrap();
    assert_eq!(response.user.id, 7);
    assert_eq!(store.access_token().as_deref(), Some("A1"));
    assert_eq!(store.refresh_token().as_deref(), Some("R1"));
    assert_eq!(client.session_state(), SessionState::Authenticated);

    let me = client.me().await.unwrap();
    assert_eq!(me.email, "user@x.com");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_not_a_session_expiry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(api_base(&mock_server)).unwrap();
    let err = client.login("user@x.com", "nope").await.unwrap_err();

    assert!(matches!(err, ClientError::AuthenticationFailed(_)));
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    assert_eq!(client.session_state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_register_sends_brand_name_in_camel_case() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_partial_json(json!({
            "email": "new@x.com",
            "brandName": "Cafe Moka",
            "password_confirmation": "secret123"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "A1",
            "refresh_token": "R1",
            "user": user_json()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client_with_store(&mock_server, store.clone());

    client
        .register(&RegisterRequest {
            email: "new@x.com".into(),
            password: "secret123".into(),
            password_confirmation: "secret123".into(),
            brand_name: "Cafe Moka".into(),
            industry: "cafe".into(),
        })
        .await
        .unwrap();
    assert_eq!(store.access_token().as_deref(), Some("A1"));
}

#[tokio::test]
async fn test_anonymous_request_has_no_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/reservation/moka1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "brand_name": "Cafe Moka",
            "title": "Book a table",
            "fields": [],
            "available_slots": []
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(api_base(&mock_server)).unwrap();
    let page = client.public_reservation_page("moka1234").await.unwrap();
    assert_eq!(page.brand_name, "Cafe Moka");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert!(!requests[0].headers.contains_key("x-retry"));
}

#[tokio::test]
async fn test_validation_error_is_typed_and_does_not_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rules"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid.",
            "errors": {
                "keywords": ["The keywords field is required."]
            }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (client, store) = signed_in_client(&mock_server, "A1", "R1");
    let err = client
        .create_rule(&serde_json::from_value(json!({
            "name": "Empty",
            "match_type": "CONTAINS",
            "keywords": "",
            "response_template": "Hi",
            "priority": 1
        }))
        .unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    match err.body() {
        Some(ApiErrorBody::Validation { errors, .. }) => {
            assert_eq!(errors["keywords"], vec!["The keywords field is required."]);
        }
        other => panic!("expected validation body, got {other:?}"),
    }
    assert_eq!(store.access_token().as_deref(), Some("A1"));
}

#[tokio::test]
async fn test_forbidden_passes_through_untouched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subscription/usage"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error": "plan_limit_reached"})),
        )
        .mount(&mock_server)
        .await;

    let (client, store) = signed_in_client(&mock_server, "A1", "R1");
    let err = client.subscription_usage().await.unwrap_err();

    assert!(matches!(
        &err,
        ClientError::Forbidden(ApiErrorBody::Code { error }) if error == "plan_limit_reached"
    ));
    assert!(!err.is_auth_expired());
    assert_eq!(store.access_token().as_deref(), Some("A1"));
    assert_eq!(store.refresh_token().as_deref(), Some("R1"));
    assert_eq!(client.session_state(), SessionState::Authenticated);
    assert_eq!(hits(&mock_server, "/api/auth/refresh").await, 0);
}

#[tokio::test]
async fn test_server_error_keeps_unparsed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let (client, _store) = signed_in_client(&mock_server, "A1", "R1");
    let err = client.dashboard_stats().await.unwrap_err();

    match err {
        ClientError::ServerError { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, ApiErrorBody::Unknown("Bad Gateway".into()));
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rules"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::builder()
        .base_url(api_base(&mock_server))
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let result = client.list_rules().await;
    assert!(matches!(result, Err(ClientError::Timeout)));
}

#[tokio::test]
async fn test_zero_timeout_disables_the_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rules"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([rule_json(3)]))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        base_url: api_base(&mock_server),
        timeout_secs: 0,
        ..ClientConfig::default()
    };
    let client = ApiClient::builder().config(&config).build().unwrap();

    let rules = client.list_rules().await.unwrap();
    assert_eq!(rules.len(), 1);
}

#[tokio::test]
async fn test_list_logs_sends_filters_and_reads_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/logs"))
        .and(query_param("page", "2"))
        .and(query_param("channel", "instagram"))
        .and(query_param("date_from", "2024-05-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 11,
                "channel": "instagram",
                "sender_id": "ig_42",
                "received_message": "open today?",
                "response_message": "We are open 9-6.",
                "response_type": "rule",
                "matched_rule_id": 1,
                "created_at": "2024-05-02T09:00:00"
            }],
            "meta": {"current_page": 2, "last_page": 3, "per_page": 20, "total": 41}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = signed_in_client(&mock_server, "A1", "R1");
    let query = LogQuery {
        channel: Some(ChannelType::Instagram),
        date_from: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
        page: Some(2),
        ..Default::default()
    };
    let page = client.list_logs(&query).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].matched_rule_id, Some(1));
    assert_eq!(page.next_page(), Some(3));
}

#[tokio::test]
async fn test_export_logs_returns_raw_bytes() {
    let mock_server = MockServer::start().await;

    let csv = "id,channel,received_message\n11,instagram,open today?\n";
    Mock::given(method("GET"))
        .and(path("/api/logs/export"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(csv, "text/csv"))
        .mount(&mock_server)
        .await;

    let (client, _store) = signed_in_client(&mock_server, "A1", "R1");
    let before = chrono::Utc::now().date_naive();
    let export = client
        .export_logs(&LogExportQuery::default())
        .await
        .unwrap();
    let after = chrono::Utc::now().date_naive();

    assert_eq!(export.contents, csv.as_bytes());
    // Named after the UTC calendar day
    assert!(
        export.filename == ExportFile::filename_for(before)
            || export.filename == ExportFile::filename_for(after)
    );
}

#[tokio::test]
async fn test_update_rule_sends_only_changed_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/rules/4"))
        .and(body_json(json!({
            "include_estimate_link": true,
            "active_hours_start": "09:00",
            "active_hours_end": "18:00"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rule_json(4)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = signed_in_client(&mock_server, "A1", "R1");
    let update = RuleUpdate {
        include_estimate_link: Some(true),
        active_hours_start: Some("09:00".into()),
        active_hours_end: Some("18:00".into()),
        ..RuleUpdate::default()
    };

    let rule = client.update_rule(4, &update).await.unwrap();
    assert_eq!(rule.id, 4);
}

#[tokio::test]
async fn test_toggle_rule_uses_patch() {
    let mock_server = MockServer::start().await;

    let mut toggled = rule_json(4);
    toggled["is_active"] = json!(false);
    Mock::given(method("PATCH"))
        .and(path("/api/rules/4/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(toggled))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = signed_in_client(&mock_server, "A1", "R1");
    let rule = client.toggle_rule(4).await.unwrap();
    assert!(!rule.is_active);
}

#[tokio::test]
async fn test_logout_without_session_sends_nothing() {
    let mock_server = MockServer::start().await;

    let client = ApiClient::new(api_base(&mock_server)).unwrap();
    client.logout().await.unwrap();
    client.logout().await.unwrap();

    assert!(mock_server.received_requests().await.unwrap().is_empty());
    assert_eq!(client.session_state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_logout_clears_session_even_when_backend_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, store) = signed_in_client(&mock_server, "A1", "R1");
    client.logout().await.unwrap();

    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert_eq!(client.session_state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_logout_rejected_by_backend_does_not_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (client, store) = signed_in_client(&mock_server, "A1", "R1");
    client.logout().await.unwrap();

    assert!(store.access_token().is_none());
    assert_eq!(client.session_state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_upgrade_returns_checkout_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/subscription/upgrade"))
        .and(body_json(json!({"plan": "pro"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"checkout_url": "https://pay.example/checkout/1"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = signed_in_client(&mock_server, "A1", "R1");
    let checkout = client.upgrade_subscription(Plan::Pro).await.unwrap();
    assert_eq!(checkout.checkout_url, "https://pay.example/checkout/1");

    // Downgrading to free is not an upgrade and never reaches the backend
    let result = client.upgrade_subscription(Plan::Free).await;
    assert!(matches!(result, Err(ClientError::Configuration(_))));
    assert_eq!(hits(&mock_server, "/api/subscription/upgrade").await, 1);
}

#[tokio::test]
async fn test_connect_channel_returns_auth_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/channels/kakao/connect"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"auth_url": "https://kauth.example/authorize"})),
        )
        .mount(&mock_server)
        .await;

    let (client, _store) = signed_in_client(&mock_server, "A1", "R1");
    let response = client.connect_channel(ChannelType::Kakao).await.unwrap();
    assert_eq!(response.auth_url, "https://kauth.example/authorize");
}

#[tokio::test]
async fn test_save_onboarding_step_posts_to_step_number() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/onboarding/step/5"))
        .and(body_json(json!({"tone_style": "friendly", "tone_example": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Step 5 saved",
            "next_step": 6
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = signed_in_client(&mock_server, "A1", "R1");
    let saved = client
        .save_onboarding_step(&OnboardingStep::Tone(ToneSetting {
            tone_style: Some("friendly".into()),
            tone_example: None,
        }))
        .await
        .unwrap();
    assert_eq!(saved.next_step, Some(6));
}

#[tokio::test]
async fn test_webhook_test_defaults_sender() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/webhook/instagram/test"))
        .and(body_json(json!({"message": "hello", "sender_id": "test_user"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"handled": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _store) = signed_in_client(&mock_server, "A1", "R1");
    let report = client.test_instagram_webhook("hello", None).await.unwrap();
    assert_eq!(report["handled"], json!(true));
}
