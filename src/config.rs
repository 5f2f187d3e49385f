/// Application configuration
///
/// Layered as: built-in defaults, then an optional JSON file in the user's
/// config directory, then environment variables (a `.env` file is honoured).
/// - Linux: ~/.config/sketch-render/config.json
/// - macOS: ~/Library/Application Support/sketch-render/config.json
/// - Windows: %APPDATA%\sketch-render\config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ConfigError;
use crate::ui::theme::Skin;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_VERIFY_URL: &str = "https://smrturl.co/a568170";
pub const DEFAULT_VERIFY_DELAY_MS: u64 = 2000;
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "architectural-render.png";

const ENV_API_URL: &str = "RENDER_API_URL";
const ENV_API_PREFIX: &str = "RENDER_API_PREFIX";
const ENV_VERIFY_URL: &str = "RENDER_VERIFY_URL";
const ENV_VERIFY_DELAY: &str = "RENDER_VERIFY_DELAY_MS";
const ENV_SKIN: &str = "RENDER_SKIN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme, host and port of the render service
    pub base_url: String,
    /// Optional path segment before `/generate-render`, e.g. "/api"
    pub api_prefix: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_prefix: None,
        }
    }
}

impl ApiConfig {
    /// Resolve `{base_url}{prefix}/{path}`
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.join(self.api_prefix.as_deref(), path)
    }

    /// The service root, `{base_url}/`. The prefix only applies to API routes.
    pub fn root(&self) -> Result<Url, ConfigError> {
        self.join(None, "")
    }

    fn join(&self, prefix: Option<&str>, path: &str) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let base = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }

        let mut joined = self.base_url.trim_end_matches('/').to_string();
        if let Some(prefix) = prefix {
            let prefix = prefix.trim_matches('/');
            if !prefix.is_empty() {
                joined.push('/');
                joined.push_str(prefix);
            }
        }
        joined.push('/');
        joined.push_str(path.trim_start_matches('/'));

        Url::parse(&joined).map_err(|e| invalid(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Page opened in the browser for the verification step
    pub url: String,
    /// How long after opening the page the gate unlocks
    pub delay_ms: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_VERIFY_URL.to_string(),
            delay_ms: DEFAULT_VERIFY_DELAY_MS,
        }
    }
}

impl VerificationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub verification: VerificationConfig,
    pub skin: Skin,
    /// Name pre-filled in the save dialog
    pub download_filename: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            verification: VerificationConfig::default(),
            skin: Skin::default(),
            download_filename: DEFAULT_DOWNLOAD_FILENAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the default config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match Self::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        for e in config.apply_env(|key| std::env::var(key).ok()) {
            warn!("⚠️  Ignoring {}", e);
        }
        config.api.root()?;

        info!("⚙️  Render service: {}", config.api.base_url);
        Ok(config)
    }

    /// Get the path where the config file is expected
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("sketch-render");
        path.push("config.json");
        Some(path)
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        info!("📁 Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override fields from environment-style lookups.
    ///
    /// A value that doesn't parse is skipped and returned; the field keeps
    /// whatever the earlier layers set.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();
        let invalid = |key: &'static str, value: &str| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        };

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            let candidate = ApiConfig {
                base_url: url.trim().to_string(),
                ..self.api.clone()
            };
            match candidate.root() {
                Ok(_) => self.api = candidate,
                Err(_) => rejected.push(invalid(ENV_API_URL, &url)),
            }
        }
        if let Some(prefix) = lookup(ENV_API_PREFIX) {
            let prefix = prefix.trim();
            self.api.api_prefix = (!prefix.is_empty()).then(|| prefix.to_string());
        }
        if let Some(url) = lookup(ENV_VERIFY_URL).filter(|v| !v.trim().is_empty()) {
            self.verification.url = url.trim().to_string();
        }
        if let Some(delay) = lookup(ENV_VERIFY_DELAY) {
            match delay.trim().parse() {
                Ok(ms) => self.verification.delay_ms = ms,
                Err(_) => rejected.push(invalid(ENV_VERIFY_DELAY, &delay)),
            }
        }
        if let Some(skin) = lookup(ENV_SKIN) {
            match skin.parse() {
                Ok(skin) => self.skin = skin,
                Err(_) => rejected.push(invalid(ENV_SKIN, &skin)),
            }
        }
        rejected
    }
}
