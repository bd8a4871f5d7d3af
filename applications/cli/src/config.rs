//! CLI configuration

use anyhow::{bail, Context, Result};
use gigs_client::ClientConfig;
use gigs_core::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GigsConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,

    #[serde(default = "default_notices")]
    pub notices: NoticeSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Static media server; the API base when unset
    #[serde(default)]
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NoticeSettings {
    #[serde(default = "default_success_secs")]
    pub success_secs: u64,

    #[serde(default = "default_error_secs")]
    pub error_secs: u64,
}

impl GigsConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // An explicit path must exist; the default one is optional
        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (GIGS_API__URL, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("GIGS")
                .separator("__")
                .try_parsing(true),
        );

        settings
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        check_url("api.url", &self.api.url)?;
        if let Some(media_url) = &self.api.media_url {
            check_url("api.media_url", media_url)?;
        }

        if self.session.path.as_os_str().is_empty() {
            bail!("Session path is required (set GIGS_SESSION__PATH)");
        }

        if self.notices.success_secs == 0 || self.notices.error_secs == 0 {
            bail!("Notice durations must be at least one second");
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api.url.clone());
        match &self.api.media_url {
            Some(media_url) => config.with_media_url(media_url.clone()),
            None => config,
        }
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            success_notice: Duration::from_secs(self.notices.success_secs),
            error_notice: Duration::from_secs(self.notices.error_secs),
        }
    }
}

impl Default for GigsConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            session: default_session(),
            notices: default_notices(),
        }
    }
}

fn check_url(key: &str, url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("{key} must start with http:// or https:// (got {url:?})");
    }
    Ok(())
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        url: default_api_url(),
        media_url: None,
    }
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_session() -> SessionSettings {
    SessionSettings {
        path: default_session_path(),
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

fn default_notices() -> NoticeSettings {
    NoticeSettings {
        success_secs: default_success_secs(),
        error_secs: default_error_secs(),
    }
}

fn default_success_secs() -> u64 {
    3
}

fn default_error_secs() -> u64 {
    5
}
