//! AutoReply HTTP client
//!
//! Every backend call goes through one pipeline: the stored access
//! credential is attached as a bearer header, and a 401 triggers at most one
//! credential refresh followed by a single replay of the original request.
//! When the session cannot be recovered the stored credentials are cleared
//! and the call fails with [`ClientError::SessionExpired`].

pub mod ai;
pub mod auth;
pub mod channels;
pub mod dashboard;
pub mod estimates;
pub mod logs;
pub mod onboarding;
pub mod profile;
pub mod refresh;
pub mod request;
pub mod reservations;
pub mod rules;
pub mod subscription;
pub mod webhook;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, watch};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::{MemorySessionStore, SessionState, SessionStore};
pub use request::{ApiRequest, RETRY_HEADER};

/// AutoReply API client
///
/// Cloning is cheap; clones share the session store, the session state and
/// the refresh gate.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    state: Arc<watch::Sender<SessionState>>,
    refresh_gate: Arc<Mutex<()>>,
}

impl ApiClient {
    /// Create a new client with default configuration and an in-memory session
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The injected session store
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Current session state
    pub fn session_state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Observe session state transitions
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Called by the application shell once it has routed the user back to
    /// login after an expiry
    pub fn acknowledge_expired(&self) {
        self.state.send_if_modified(|state| {
            if *state == SessionState::Expired {
                *state = SessionState::Anonymous;
                true
            } else {
                false
            }
        });
    }

    /// Drop the stored credentials without contacting the backend
    pub fn clear_session(&self) -> Result<(), ClientError> {
        self.store.clear()?;
        self.set_state(SessionState::Anonymous);
        Ok(())
    }

    pub(crate) fn set_state(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            debug!(from = %previous, to = %next, "Session state changed");
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Execute a request and decode a JSON response
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Execute a request whose response body is not needed
    pub async fn execute_empty(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.send(request).await?;
        Ok(())
    }

    /// Execute a request and return the raw response body
    pub async fn execute_bytes(&self, request: ApiRequest) -> Result<Vec<u8>, ClientError> {
        let response = self.send(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Send through the full pipeline, recovering from one refreshable 401
    async fn send(&self, mut request: ApiRequest) -> Result<Response, ClientError> {
        loop {
            let sent_token = self.store.access_token();
            let response = self.dispatch(&request, sent_token.as_deref()).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }
            if status != StatusCode::UNAUTHORIZED {
                return Err(Self::error_from_response(response).await);
            }

            if request.is_retry() {
                return Err(self.expire_session("replayed request rejected"));
            }
            self.recover_unauthorized(sent_token.as_deref()).await?;
            request.mark_retry();
        }
    }

    /// Send once without the 401 interceptor; non-success maps to an error
    pub(crate) async fn send_unintercepted(
        &self,
        request: &ApiRequest,
        with_credentials: bool,
    ) -> Result<Response, ClientError> {
        let token = if with_credentials {
            self.store.access_token()
        } else {
            None
        };
        let response = self.dispatch(request, token.as_deref()).await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        access_token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let mut builder = self
            .client
            .request(request.method().clone(), self.url(request.path()));

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(token) = access_token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if request.is_retry() {
            builder = builder.header(RETRY_HEADER, "true");
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        debug!(
            method = %request.method(),
            path = request.path(),
            authenticated = access_token.is_some(),
            retry = request.is_retry(),
            "Sending request"
        );
        let response = builder.send().await?;
        debug!(
            method = %request.method(),
            path = request.path(),
            status = response.status().as_u16(),
            "Received response"
        );
        Ok(response)
    }

    async fn error_from_response(response: Response) -> ClientError {
        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        ClientError::from_status(status, &text)
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    store: Option<Arc<dyn SessionStore>>,
}

impl ApiClientBuilder {
    /// Start from a loaded configuration
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = Some(config.timeout());
        self.user_agent = Some(config.user_agent.clone());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout; zero disables it
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the store that owns the credential pair
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let defaults = ClientConfig::default();

        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url {base_url}: {e}")))?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut client = ClientBuilder::new()
            .user_agent(self.user_agent.unwrap_or_else(|| defaults.user_agent.clone()))
            .default_headers(default_headers);
        let timeout = self.timeout.unwrap_or_else(|| defaults.timeout());
        if !timeout.is_zero() {
            client = client.timeout(timeout);
        }
        let client = client.build()?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemorySessionStore::new()));

        // Optimistically authenticated until a verification call says otherwise
        let initial = if store.access_token().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        let (state, _) = watch::channel(initial);

        Ok(ApiClient {
            client,
            base_url,
            store,
            state: Arc::new(state),
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }
}
