//! AutoReply CLI - admin console for the AutoReplyX backend

mod commands;
mod config;
mod logging;

use anyhow::{Context, Result};
use autoreply_client::{ApiClient, AuthContext, ClientError, FileSessionStore};
use clap::{Parser, ValueEnum};
use commands::Commands;
use config::{Settings, StateDir};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "autoreply")]
#[command(about = "Manage an AutoReplyX account from the terminal")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (defaults to <config dir>/autoreply.toml if present)
    #[arg(short = 'c', long, global = true, env = "AUTOREPLY_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for all CLI state (config, credentials, logs)
    #[arg(short = 'd', long, global = true, env = "AUTOREPLY_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Request timeout in seconds, overriding configuration
    #[arg(short = 't', long, global = true)]
    timeout: Option<u64>,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let state_dir = cli
        .state_dir
        .as_ref()
        .map_or_else(StateDir::new, StateDir::with_override);
    let log_file = (!cli.no_file_log).then(|| state_dir.log_path());
    logging::init_logging(cli.log_level.into(), log_file.as_deref())?;

    let mut settings = Settings::load(cli.config.as_deref(), &state_dir)?;
    if let Some(timeout) = cli.timeout {
        settings.api.timeout_secs = timeout;
    }

    let auth = connect(&settings)?;
    match cli.command.execute(&auth).await {
        Ok(()) => {
            debug!("Command completed successfully");
        }
        Err(e) if is_session_expired(&e) => {
            // The stored credentials are already gone; settle back to anonymous
            auth.client().acknowledge_expired();
            eprintln!("Your session has expired. Run `autoreply login` to sign in again.");
            std::process::exit(2);
        }
        Err(e) => {
            error!("Command failed: {e:#}");
            eprintln!("Error: {}", user_facing(&e));
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Build the auth context over the persisted session
fn connect(settings: &Settings) -> Result<AuthContext> {
    let path = settings
        .credentials_path()
        .context("No credentials path configured")?;
    let store = FileSessionStore::open(path)
        .with_context(|| format!("Failed to open session store at {}", path.display()))?;

    let client = ApiClient::builder()
        .config(&settings.api)
        .session_store(Arc::new(store))
        .build()
        .context("Failed to create API client")?;
    Ok(AuthContext::new(client))
}

fn is_session_expired(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ClientError>()
        .is_some_and(ClientError::is_auth_expired)
}

/// Prefer the backend's own message for API errors
fn user_facing(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(client_err) => client_err.user_message(&client_err.to_string()),
        None => format!("{err:#}"),
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
