//! AutoReply admin API client
//!
//! Typed access to the AutoReplyX backend: channels, rules, reservations,
//! estimates, message logs, dashboard statistics, profile, subscription and
//! onboarding. All calls share one authenticated request pipeline that
//! attaches the stored bearer credential and silently refreshes it once when
//! the backend answers 401.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod session;
pub mod types;

pub use client::logs::ExportFile;
pub use client::{ApiClient, ApiClientBuilder, ApiRequest};
pub use config::ClientConfig;
pub use context::{AuthContext, AuthStatus};
pub use error::{ApiErrorBody, ClientError};
pub use session::{
    CredentialPair, FileSessionStore, MemorySessionStore, SessionState, SessionStore,
};

pub type Result<T> = std::result::Result<T, ClientError>;
