// SPDX-License-Identifier: Apache-2.0

//! Configuration management for Labelbot.
//!
//! Provides layered configuration from files and environment variables.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Legacy environment variables (`TEXT_ANALYTICS_ENDPOINT`,
//!    `TEXT_ANALYTICS_KEY`)
//! 2. Environment variables (prefix: `LABELBOT_`, `__` separator)
//! 3. Config file (optional TOML, path supplied by the caller)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Override the webhook bind port via environment variable
//! LABELBOT_SERVER__PORT=8080 labelbot-server
//! ```

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::LabelbotError;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Webhook server settings.
    pub server: ServerConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Key-phrase service settings.
    pub keyphrase: KeyPhraseConfig,
}

/// Webhook server settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Shared secret used to verify webhook delivery signatures.
    /// Verification is skipped when empty.
    pub webhook_secret: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_timeout_seconds: 10,
            webhook_secret: String::new(),
        }
    }
}

/// Key-phrase service settings.
///
/// Both `endpoint` and `key` default to the empty string when absent;
/// extraction then degrades cleanly to "no phrases found".
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeyPhraseConfig {
    /// Base endpoint of the Text Analytics service.
    pub endpoint: String,
    /// Pre-shared subscription key.
    pub key: String,
    /// Request timeout in seconds; a timeout is treated as a failed call.
    pub timeout_seconds: u64,
}

impl Default for KeyPhraseConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            key: String::new(),
            timeout_seconds: 10,
        }
    }
}

/// Load application configuration.
///
/// Loads from an optional config file and environment variables, then
/// applies the legacy `TEXT_ANALYTICS_ENDPOINT` / `TEXT_ANALYTICS_KEY`
/// overrides carried over from the original deployment.
///
/// # Errors
///
/// Returns `LabelbotError::Config` if the config file exists but is
/// invalid, or if an environment override fails to parse.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, LabelbotError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        builder = builder.add_source(File::with_name(path).required(false));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("LABELBOT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut app_config: AppConfig = config.try_deserialize()?;

    if let Ok(endpoint) = std::env::var("TEXT_ANALYTICS_ENDPOINT")
        && !endpoint.is_empty()
    {
        app_config.keyphrase.endpoint = endpoint;
    }
    if let Ok(key) = std::env::var("TEXT_ANALYTICS_KEY")
        && !key.is_empty()
    {
        app_config.keyphrase.key = key;
    }

    Ok(app_config)
}
