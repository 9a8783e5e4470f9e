//! Configuration System
//!
//! Layered configuration for a wordcast run: built-in defaults, an optional
//! TOML file, then `WORDCAST_*` environment overrides. The two secrets (the
//! provider API key and the webhook URL) are only ever read from the process
//! environment and are checked before any network call is made.

use crate::error::ApiError;
use crate::generation::prompt::{default_topics, TopicQuota};
use crate::generation::DEFAULT_DESCRIPTION_PLACEHOLDER;
use crate::history::DEFAULT_MAX_ENTRIES;
use crate::logging::LoggingConfig;
use crate::notifier::EmbedStyle;
use crate::resolver::{
    ModelResolver, DEFAULT_EXCLUDED_MARKER, DEFAULT_MODEL, DEFAULT_MODEL_MARKER,
    DEFAULT_PREFERRED_MODELS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Environment variable holding the generation provider credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the delivery webhook URL
pub const WEBHOOK_URL_VAR: &str = "DISCORD_WEBHOOK_URL";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordcastConfig {
    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub generation: GenerationSettings,

    #[serde(default)]
    pub delivery: DeliverySettings,

    #[serde(default)]
    pub history: HistorySettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Used when the model list cannot be fetched or is empty
    #[serde(default = "default_model")]
    pub default_model: String,

    #[serde(default = "default_preferred_models")]
    pub preferred_models: Vec<String>,

    /// Token a fallback model identifier must contain
    #[serde(default = "default_model_marker")]
    pub model_marker: String,

    /// Token that disqualifies a fallback model identifier
    #[serde(default = "default_excluded_marker")]
    pub excluded_marker: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_preferred_models() -> Vec<String> {
    DEFAULT_PREFERRED_MODELS.iter().map(|s| s.to_string()).collect()
}

fn default_model_marker() -> String {
    DEFAULT_MODEL_MARKER.to_string()
}

fn default_excluded_marker() -> String {
    DEFAULT_EXCLUDED_MARKER.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_model: default_model(),
            preferred_models: default_preferred_models(),
            model_marker: default_model_marker(),
            excluded_marker: default_excluded_marker(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ProviderSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resolver(&self) -> ModelResolver {
        ModelResolver::new(
            self.preferred_models.clone(),
            self.model_marker.clone(),
            self.excluded_marker.clone(),
            self.default_model.clone(),
        )
    }
}

/// Prompt and retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_topics")]
    pub topics: Vec<TopicQuota>,

    #[serde(default = "default_rate_limit_backoff_secs")]
    pub rate_limit_backoff_secs: f64,

    #[serde(default = "default_description_placeholder")]
    pub description_placeholder: String,
}

fn default_rate_limit_backoff_secs() -> f64 {
    5.0
}

fn default_description_placeholder() -> String {
    DEFAULT_DESCRIPTION_PLACEHOLDER.to_string()
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            topics: default_topics(),
            rate_limit_backoff_secs: default_rate_limit_backoff_secs(),
            description_placeholder: default_description_placeholder(),
        }
    }
}

impl GenerationSettings {
    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_secs_f64(self.rate_limit_backoff_secs.max(0.0))
    }
}

/// Embed presentation settings; unset fields keep the built-in style
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliverySettings {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<u32>,
    #[serde(default)]
    pub footer: Option<String>,
}

impl DeliverySettings {
    pub fn embed_style(&self) -> EmbedStyle {
        let base = EmbedStyle::default();
        EmbedStyle {
            title: self.title.clone().unwrap_or(base.title),
            description: self.description.clone().unwrap_or(base.description),
            color: self.color.unwrap_or(base.color),
            footer: self.footer.clone().unwrap_or(base.footer),
        }
    }
}

/// History file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_history_path() -> PathBuf {
    PathBuf::from("vocab_history.json")
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            max_entries: default_max_entries(),
        }
    }
}

impl WordcastConfig {
    /// Validate settings that would otherwise fail late in a run
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();

        if self.provider.base_url.trim().is_empty() {
            errors.push("provider.base_url cannot be empty".to_string());
        }
        if self.provider.default_model.trim().is_empty() {
            errors.push("provider.default_model cannot be empty".to_string());
        }
        if self.generation.topics.is_empty() {
            errors.push("generation.topics must name at least one topic".to_string());
        } else if self.generation.topics.iter().all(|t| t.count == 0) {
            errors.push("generation.topics must request at least one word".to_string());
        }
        if !self.generation.rate_limit_backoff_secs.is_finite()
            || self.generation.rate_limit_backoff_secs < 0.0
        {
            errors.push("generation.rate_limit_backoff_secs must be a non-negative number".to_string());
        }
        if self.history.max_entries == 0 {
            errors.push("history.max_entries must be greater than zero".to_string());
        }
        if self.history.path.as_os_str().is_empty() {
            errors.push("history.path cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }
}

/// Credentials for the two outbound endpoints
#[derive(Clone)]
pub struct Secrets {
    pub api_key: String,
    pub webhook_url: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("api_key", &"<redacted>")
            .field("webhook_url", &"<redacted>")
            .finish()
    }
}

impl Secrets {
    /// Read both secrets through `lookup`; blank values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ApiError::ConfigurationMissing(key.to_string()))
        };
        Ok(Self {
            api_key: require(API_KEY_VAR)?,
            webhook_url: require(WEBHOOK_URL_VAR)?,
        })
    }

    /// Read only the provider credential, for commands that never deliver
    pub fn api_key_from_lookup<F>(lookup: F) -> Result<String, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::ConfigurationMissing(API_KEY_VAR.to_string()))
    }
}
