//! Application configuration for profilegraph.
//!
//! User config lives at `~/.profilegraph/profilegraph.toml`.
//! Environment overrides are applied on top of the file, which overrides defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileGraphError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "profilegraph.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".profilegraph";

/// Credential value shipped in sample env files. Treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your-openai-api-key";

/// Env var overriding `[completion].endpoint`.
const ENDPOINT_ENV: &str = "OPENAI_API_ENDPOINT";

/// Env var overriding `[completion].model`.
const MODEL_ENV: &str = "OPENAI_MODEL";

// ---------------------------------------------------------------------------
// Config structs (matching profilegraph.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion endpoint settings.
    #[serde(default)]
    pub completion: CompletionSection,

    /// Source page fetching.
    #[serde(default)]
    pub fetch: FetchSection,
}

/// `[completion]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionSection {
    /// Chat-completions URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model identifier sent with each request.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Whole-request timeout for one completion call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CompletionSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".into()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2048
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSection {
    /// Per-page timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent sent with page requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Characters of page text kept in a scrape report.
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .into()
}
fn default_excerpt_chars() -> usize {
    1000
}

// ---------------------------------------------------------------------------
// Runtime configs (resolved once, passed explicitly)
// ---------------------------------------------------------------------------

/// Resolved completion-endpoint settings, including the credential.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub endpoint: String,
    /// `None` forces template-only generation.
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl CompletionConfig {
    /// Build from the config file section and an explicitly supplied key.
    pub fn new(section: &CompletionSection, api_key: Option<String>) -> Self {
        Self {
            endpoint: section.endpoint.clone(),
            api_key,
            model: section.model.clone(),
            temperature: section.temperature,
            max_tokens: section.max_tokens,
            timeout: Duration::from_secs(section.timeout_secs),
        }
    }

    /// Resolve from `config`, reading the key from the env var it names.
    pub fn from_env(config: &AppConfig) -> Self {
        let api_key = std::env::var(&config.completion.api_key_env).ok();
        Self::new(&config.completion, api_key)
    }

    /// The credential, if it is present and not the sample placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}

/// Resolved page-fetch settings.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub excerpt_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.fetch.timeout_secs),
            user_agent: config.fetch.user_agent.clone(),
            excerpt_chars: config.fetch.excerpt_chars,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.profilegraph/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ProfileGraphError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.profilegraph/profilegraph.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk and apply env overrides.
/// Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    let mut config = if path.exists() {
        load_config_from(&path)?
    } else {
        tracing::debug!(?path, "config file not found, using defaults");
        AppConfig::default()
    };

    config.apply_overrides(
        std::env::var(ENDPOINT_ENV).ok(),
        std::env::var(MODEL_ENV).ok(),
    );
    Ok(config)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ProfileGraphError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ProfileGraphError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ProfileGraphError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ProfileGraphError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ProfileGraphError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

impl AppConfig {
    /// Replace endpoint/model with non-empty override values.
    pub fn apply_overrides(&mut self, endpoint: Option<String>, model: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|v| !v.trim().is_empty()) {
            self.completion.endpoint = endpoint;
        }
        if let Some(model) = model.filter(|v| !v.trim().is_empty()) {
            self.completion.model = model;
        }
    }
}
