//! CLI configuration and state directories

use anyhow::{Context, Result};
use autoreply_client::ClientConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prefix of environment overrides, e.g. `AUTOREPLY__API__BASE_URL`
const ENV_PREFIX: &str = "AUTOREPLY";
const ENV_SEPARATOR: &str = "__";

/// Manages platform-specific application directories
pub struct StateDir {
    project_dirs: Option<ProjectDirs>,
    /// Override directory for testing or custom installations
    override_dir: Option<PathBuf>,
}

impl StateDir {
    pub fn new() -> Self {
        let project_dirs = ProjectDirs::from("com", "AutoReplyX", "autoreply");
        if project_dirs.is_none() {
            warn!("Failed to determine platform-specific directories, will use fallback");
        }
        Self {
            project_dirs,
            override_dir: None,
        }
    }

    /// Keep all state under `path`
    pub fn with_override(path: impl Into<PathBuf>) -> Self {
        Self {
            project_dirs: None,
            override_dir: Some(path.into()),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("config");
        }
        self.project_dirs.as_ref().map_or_else(
            || PathBuf::from("./config"),
            |dirs| dirs.config_dir().to_path_buf(),
        )
    }

    pub fn data_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("data");
        }
        self.project_dirs.as_ref().map_or_else(
            || PathBuf::from("./data"),
            |dirs| dirs.data_dir().to_path_buf(),
        )
    }

    /// Config file picked up when `--config` is not given
    pub fn config_path(&self) -> PathBuf {
        self.config_dir().join("autoreply.toml")
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir().join("credentials.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("cli.log")
    }
}

impl Default for StateDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the CLI reads from configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ClientConfig,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Where the credential pair is persisted
    pub credentials_path: Option<PathBuf>,
}

impl Settings {
    /// Load defaults, then the config file, then `AUTOREPLY__*` variables
    ///
    /// An explicit `config_file` must exist; the default one is optional.
    pub fn load(config_file: Option<&Path>, state_dir: &StateDir) -> Result<Self> {
        Self::load_from(
            config_file,
            state_dir,
            config::Environment::with_prefix(ENV_PREFIX),
        )
    }

    fn load_from(
        config_file: Option<&Path>,
        state_dir: &StateDir,
        environment: config::Environment,
    ) -> Result<Self> {
        let defaults = ClientConfig::default();
        let file = match config_file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::from(state_dir.config_path()).required(false),
        };

        let settings = config::Config::builder()
            .set_default("api.base_url", defaults.base_url)?
            .set_default("api.timeout_secs", defaults.timeout_secs)?
            .set_default("api.user_agent", defaults.user_agent)?
            .add_source(file)
            .add_source(
                environment
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load configuration")?;

        let mut settings: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        if settings.session.credentials_path.is_none() {
            settings.session.credentials_path = Some(state_dir.credentials_path());
        }
        debug!(base_url = %settings.api.base_url, "Loaded settings");
        Ok(settings)
    }

    pub fn credentials_path(&self) -> Option<&Path> {
        self.session.credentials_path.as_deref()
    }
}
