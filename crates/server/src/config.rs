//! # Application Configuration
//!
//! This module defines the configuration structure for the `hrqa-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables.

use hrqa::constants::DEFAULT_COLLECTION_NAME;
use hrqa::prompts::tasks::{ANSWER_USER_PROMPT, WEB_SEARCH_USER_PROMPT};
use hrqa::RetrievalConfig;
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::time::Duration;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    pub store: StoreConfig,
    /// Must name the model the corpus was indexed with.
    pub embedding: EmbeddingConfig,
    /// A map of named, reusable AI provider configurations.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    pub answer: AnswerConfig,
    pub web_search: WebSearchConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    5002
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Base URL of the Chroma server.
    pub url: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION_NAME.to_string()
}

/// Configuration for the text embedding model provider.
#[derive(Deserialize, Clone)]
pub struct EmbeddingConfig {
    pub api_url: String,
    pub model_name: String,
    pub api_key: Option<String>,
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("api_url", &self.api_url)
            .field("model_name", &self.model_name)
            .field("api_key", &redacted(self.api_key.as_deref()))
            .finish()
    }
}

/// Shows whether a key is set without revealing it.
fn redacted(key: Option<&str>) -> &'static str {
    match key.map(str::trim) {
        Some(key) if !key.is_empty() => "<redacted>",
        _ => "<unset>",
    }
}

/// A reusable configuration for a specific AI provider instance.
#[derive(Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider: "local" (OpenAI-compatible) or "anthropic".
    pub provider: String,
    /// The API URL. Optional for "anthropic", where the public endpoint is used.
    pub api_url: Option<String>,
    /// An empty or missing key disables the provider.
    pub api_key: Option<String>,
    pub model_name: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 {
    2000
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("api_key", &redacted(self.api_key.as_deref()))
            .field("model_name", &self.model_name)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ProviderConfig {
    /// The API key, if one is actually set.
    pub fn configured_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnswerConfig {
    /// Provider names in order of preference.
    #[serde(default)]
    pub providers: Vec<String>,
    pub user_prompt: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebSearchConfig {
    /// Must name a "local" provider that understands the `search` flag.
    #[serde(default)]
    pub provider: Option<String>,
    pub user_prompt: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutConfig {
    pub store_secs: u64,
    pub generation_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            store_secs: 10,
            generation_secs: 60,
        }
    }
}

impl TimeoutConfig {
    pub fn store(&self) -> Duration {
        Duration::from_secs(self.store_secs)
    }

    pub fn generation(&self) -> Duration {
        Duration::from_secs(self.generation_secs)
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - Top-level keys like `port` are overridden by `PORT`.
/// - Nested keys are overridden by `HRQA_...` variables
///   (e.g., `HRQA_RETRIEVAL__SCOPED_MIN_SCORE`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults from the library.
        .set_default("answer.user_prompt", ANSWER_USER_PROMPT)?
        .set_default("web_search.user_prompt", WEB_SEARCH_USER_PROMPT)?;

    // Layer 2: Main Config (with Fallback)
    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        if std::path::Path::new(&user_config_path).exists() {
            info!("Loading user-defined configuration from '{user_config_path}'.");
            user_config_path
        } else {
            let fallback_path = format!("{base_path}/config.default.yml");
            info!("'{user_config_path}' not found. Falling back to '{fallback_path}'.");
            fallback_path
        }
    };

    let main_content = read_and_substitute(&main_config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Main config file not found at '{main_config_path}'. Please ensure 'config.yml' or 'config.default.yml' exists."
        ))
    })?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    let settings = builder
        // Layer 3: Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("HRQA")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config
        .retrieval
        .validate()
        .map_err(|e| ConfigError::General(e.to_string()))?;
    Ok(config)
}
